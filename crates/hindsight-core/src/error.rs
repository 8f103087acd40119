//! Centralized error types for the core crate.

use thiserror::Error;

/// Main error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Success level out of range: {0} (expected 1-5)")]
    InvalidSuccessLevel(i64),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
