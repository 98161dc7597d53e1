//! Where metadata comes from and where it is cached

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default upstream metadata repository.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/ros/rosdistro/master";

/// `[metadata]` section of the farm configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub base_url: String,
    pub index_path: String,
    /// System-level reference table, relative to `base_url`.
    pub system_table_path: String,
    /// Language-runtime reference table, relative to `base_url`.
    pub runtime_table_path: String,
    pub cache_dir: PathBuf,
    pub distribution: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_path: "index-v4.yaml".to_string(),
            system_table_path: "rosdep/base.yaml".to_string(),
            runtime_table_path: "rosdep/python.yaml".to_string(),
            cache_dir: PathBuf::from("cache"),
            distribution: "noetic".to_string(),
        }
    }
}

impl MetadataSettings {
    /// Absolute URL of a path relative to `base_url`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
