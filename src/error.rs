//! Error types for the chat client.

use thiserror::Error;

/// Client error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed, or the response body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a selected file or writing an export failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
