//! Error types for cascade-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cascade-core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid value type for operation
    #[error("Invalid value type: expected {expected}, got {actual}")]
    InvalidValueType {
        expected: &'static str,
        actual: &'static str,
    },
}

impl Error {
    /// Create an invalid value type error
    pub fn invalid_type(expected: &'static str, actual: &'static str) -> Self {
        Error::InvalidValueType { expected, actual }
    }
}
