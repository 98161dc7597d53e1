//! Error types for farm-meta

/// Result type for farm-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort metadata loading.
///
/// Data-quality problems inside otherwise well-formed documents (missing
/// descriptors, unparseable versions) are never reported here; they surface
/// as `tracing` diagnostics in the consumers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] farm_fs::Error),

    #[error("Failed to retrieve {url}: {message}")]
    Retrieval { url: String, message: String },

    #[error("Unsupported document type '{extension}' for {url}")]
    Format { url: String, extension: String },

    #[error("Distribution '{distribution}' must have exactly one manifest path, found {paths:?}")]
    UnresolvedDistributionPath {
        distribution: String,
        paths: Vec<String>,
    },

    #[error("Distribution '{distribution}' is not listed in the index")]
    UnknownDistribution { distribution: String },

    #[error("Document '{name}' has an unexpected shape: {message}")]
    MalformedDocument { name: String, message: String },
}

impl Error {
    pub(crate) fn retrieval(url: &str, message: impl ToString) -> Self {
        Self::Retrieval {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}
