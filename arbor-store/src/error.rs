//! Error types for quad-store backends.

use thiserror::Error;

/// Result type alias using our StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from a quad-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote endpoint could not be reached
    #[error("endpoint connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote endpoint answered, but not with what the protocol promises
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The backend rejected or failed an operation
    #[error("backend error: {0}")]
    Backend(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl StoreError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        StoreError::ConnectionFailed(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        StoreError::Protocol(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}
