//! Layered configuration: defaults < config file < command-line flags

use std::path::{Path, PathBuf};

use farm_fs::StructuredStore;
use farm_graph::GraphLayout;
use farm_meta::MetadataSettings;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// `[target]` section: what the plan builds for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    pub os_name: String,
    pub os_distribution: String,
    /// Python major version dependency conditions are evaluated against.
    pub python_major: String,
    /// Prefix of synthesised OS package names; defaults to `ros-<distribution>-`.
    pub package_prefix: Option<String>,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            os_name: "ubuntu".to_string(),
            os_distribution: "jammy".to_string(),
            python_major: "3".to_string(),
            package_prefix: None,
        }
    }
}

impl TargetSettings {
    pub fn package_prefix(&self, distribution: &str) -> String {
        self.package_prefix
            .clone()
            .unwrap_or_else(|| format!("ros-{distribution}-"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub metadata: MetadataSettings,
    pub target: TargetSettings,
    pub layout: GraphLayout,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cache_dir: Option<PathBuf>,
    pub distribution: Option<String>,
    pub os_distribution: Option<String>,
}

impl FarmConfig {
    /// Defaults, or the contents of `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Ok(StructuredStore::new().load(path)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(cache_dir) = overrides.cache_dir {
            self.metadata.cache_dir = cache_dir;
        }
        if let Some(distribution) = overrides.distribution {
            self.metadata.distribution = distribution;
        }
        if let Some(os_distribution) = overrides.os_distribution {
            self.target.os_distribution = os_distribution;
        }
        self
    }

    pub fn distribution(&self) -> &str {
        &self.metadata.distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_means_defaults() {
        let config = FarmConfig::load(None).unwrap();
        assert_eq!(config, FarmConfig::default());
        assert_eq!(config.target.package_prefix("noetic"), "ros-noetic-");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("buildfarm.toml");
        fs::write(
            &path,
            "[metadata]\ndistribution = \"melodic\"\n\n[layout]\nmarker_dir = \"/markers\"\n",
        )
        .unwrap();

        let config = FarmConfig::load(Some(&path)).unwrap();

        assert_eq!(config.distribution(), "melodic");
        assert_eq!(config.metadata.index_path, "index-v4.yaml");
        assert_eq!(config.layout.marker_dir, "/markers");
        assert_eq!(config.layout.artifact_dir, "/tmp/deb");
        assert_eq!(config.target.os_distribution, "jammy");
    }

    #[test]
    fn test_flags_override_file() {
        let config = FarmConfig::default().apply(Overrides {
            cache_dir: Some(PathBuf::from("/var/cache/farm")),
            distribution: Some("melodic".to_string()),
            os_distribution: None,
        });

        assert_eq!(config.metadata.cache_dir, PathBuf::from("/var/cache/farm"));
        assert_eq!(config.distribution(), "melodic");
        assert_eq!(config.target.os_distribution, "jammy");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = FarmConfig::load(Some(&temp.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
