//! Business layer errors
//!
//! Typed outcomes for teller operations; the CLI renders these as
//! user-facing messages and returns to its menu.

use minibank_persistence::PersistenceError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Teller operation errors
#[derive(Debug, Error)]
pub enum BankError {
    // === Validation errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    // === Account errors ===
    #[error("Account number already in use: {0}")]
    AccountExists(i64),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Balance for account {0} changed mid-operation; nothing was written")]
    Conflict(i64),

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for teller operations
pub type BankResult<T> = Result<T, BankError>;

impl BankError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// Check whether this is a business-rule rejection rather than a
    /// storage failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InsufficientFunds { .. }
                | Self::AccountExists(_)
                | Self::AccountNotFound(_)
        )
    }
}
