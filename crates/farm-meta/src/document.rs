//! Document addressing and payload decoding

use std::io::Read;

use flate2::read::GzDecoder;
use url::Url;

use crate::{Error, Result};

/// Parsed metadata document. Documents are never mutated after decoding.
pub type Document = serde_yaml::Value;

/// Payload encodings the store can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Plain YAML text (`.yaml`, `.yml`).
    Yaml,
    /// Gzip-compressed YAML text (`.gz`).
    GzipYaml,
}

/// Where a document lives remotely and under which name it is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub url: String,
    pub media_type: MediaType,
    /// Cache filename: the last URL path segment, `.gz` stripped.
    pub cache_name: String,
}

impl DocumentLocation {
    /// Classify a document URL.
    ///
    /// Fails with [`Error::Format`] when the path suffix is neither YAML nor
    /// gzip; nothing is fetched in that case.
    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::retrieval(url, e))?;
        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem.to_string(), ext.to_lowercase()),
            None => (file_name.clone(), String::new()),
        };

        let (media_type, cache_name) = match extension.as_str() {
            "yaml" | "yml" => (MediaType::Yaml, file_name),
            "gz" => (MediaType::GzipYaml, stem),
            _ => {
                return Err(Error::Format {
                    url: url.to_string(),
                    extension,
                });
            }
        };

        Ok(Self {
            url: url.to_string(),
            media_type,
            cache_name,
        })
    }

    /// Decode a fetched payload into a document.
    pub fn decode(&self, payload: &[u8]) -> Result<Document> {
        let text = match self.media_type {
            MediaType::Yaml => payload.to_vec(),
            MediaType::GzipYaml => {
                let mut inflated = Vec::new();
                GzDecoder::new(payload)
                    .read_to_end(&mut inflated)
                    .map_err(|e| Error::retrieval(&self.url, format!("gzip: {e}")))?;
                inflated
            }
        };

        serde_yaml::from_slice(&text).map_err(|e| Error::retrieval(&self.url, e))
    }
}
