//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A header name is empty or contains characters not allowed in a field name.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A stored value could not be interpreted as a timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An environment variable name is empty.
    #[error("invalid variable name: {0:?}")]
    InvalidVariableName(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
