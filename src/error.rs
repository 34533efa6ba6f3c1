//! Error types for ip-tracker

use thiserror::Error;

/// Main error type for ip-tracker operations
#[derive(Error, Debug)]
pub enum Error {
    /// Self-IP discovery or geolocation lookup failed (transport, status or shape)
    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for ip-tracker operations
pub type Result<T> = std::result::Result<T, Error>;
