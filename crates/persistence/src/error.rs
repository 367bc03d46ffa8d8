//! # Persistence Errors
//!
//! Error types for the persistence layer, wrapping sqlx errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Record already exists: {entity} with key {key}")]
    AlreadyExists { entity: String, key: String },

    // === Conversion errors ===
    #[error("Invalid decimal value: {0}")]
    InvalidDecimal(String),
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(entity: &str, key: &str) -> Self {
        Self::AlreadyExists {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Check whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check whether this wraps a database driver error
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
