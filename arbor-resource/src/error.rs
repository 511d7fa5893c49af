//! Error types for the resource layer

use arbor_model::Iri;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Resource-layer error taxonomy.
///
/// Constraint and not-found errors surface synchronously to the caller.
/// Backend failures are logged at debug level before being surfaced; no
/// retry happens at this layer. Collaborator failures (event serialization,
/// logging) never become errors here.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation targets an identifier with no live resource
    #[error("resource not found: {0}")]
    NotFound(Iri),

    /// Unsupported interaction model or invalid container configuration
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The underlying quad store failed
    #[error("backend failure: {0}")]
    Backend(#[from] arbor_store::StoreError),

    /// The caller cancelled the operation; its effect is unknown
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create a not-found error
    pub fn not_found(identifier: &Iri) -> Self {
        Error::NotFound(identifier.clone())
    }

    /// Create a constraint-violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Error::ConstraintViolation(msg.into())
    }
}
