//! Error types for tradelist_sync

use thiserror::Error;

/// Unified error type for tradelist_sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Scryfall answered with an error object instead of a record
    #[error("Scryfall {code}: {details}")]
    CatalogNotFound { code: String, details: String },
    /// CSV read or write failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Bad runtime configuration
    #[error("Config error: {0}")]
    Config(String),
}

/// Result alias for tradelist_sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
