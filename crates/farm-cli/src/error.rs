//! Error types for farm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from farm-meta
    #[error(transparent)]
    Meta(#[from] farm_meta::Error),

    /// Error from farm-fs
    #[error(transparent)]
    Fs(#[from] farm_fs::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}
