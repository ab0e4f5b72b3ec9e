//! Error types for the p2p-collector system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the p2p-collector system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-success response status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Malformed response payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Observation log failure. Fatal: the observation is lost.
    #[error("Sink error: {0}")]
    Sink(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a sink error.
    pub fn sink(msg: impl Into<String>) -> Self {
        Error::Sink(msg.into())
    }
}
