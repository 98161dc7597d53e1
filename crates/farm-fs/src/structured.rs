//! Format-agnostic structured document loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// Structured text formats understood by [`StructuredStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredFormat {
    Yaml,
    Toml,
    Json,
}

impl StructuredFormat {
    /// Detect the format from a path's extension.
    ///
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Loads and saves serde documents, picking the format from the file name.
///
/// Saves go through [`io::write_atomic`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredStore;

impl StructuredStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = StructuredFormat::from_path(path)?;
        let content = io::read_text(path)?;
        self.parse(path, format, &content)
    }

    /// Parse already-read content as `format`, attributing errors to `path`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        path: &Path,
        format: StructuredFormat,
        content: &str,
    ) -> Result<T> {
        let parsed = match format {
            StructuredFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            StructuredFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            StructuredFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: format.label().into(),
            message,
        })
    }

    /// Save a document to a file.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let format = StructuredFormat::from_path(path)?;
        let content = match format {
            StructuredFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            StructuredFormat::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            StructuredFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| e.to_string())
            }
        }
        .map_err(|message| Error::Serialize {
            path: path.to_path_buf(),
            format: format.label().into(),
            message,
        })?;

        io::write_text(path, &content)
    }
}
