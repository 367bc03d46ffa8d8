//! # Error Module
//!
//! Domain errors for Minibank core types, using thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Validation failures only; infrastructure errors live in the
/// persistence layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Check whether this is an amount validation failure
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, CoreError::InvalidAmount(_))
    }
}
