//! Error handling for the engine
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Application-level failures reported by the remote service
    #[error("Remote service error: {0}")]
    Remote(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),
}

impl EngineError {
    /// Build a configuration error from any displayable cause
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Build a remote-service error from any displayable cause
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}
