//! Database schema definitions
//!
//! Row types for sqlx mapping from the SQLite tables created by
//! `create_schema`.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use minibank_core::{Account, Credential};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row type for the `accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: i64,
    pub account_holder: String,
    pub account_number: i64,
    pub password_hash: String,
    pub password_salt: String,
    pub balance: String, // Decimal stored as TEXT
}

impl AccountRow {
    /// Current balance as a Decimal
    pub fn balance(&self) -> PersistenceResult<Decimal> {
        Decimal::from_str(&self.balance)
            .map_err(|e| PersistenceError::InvalidDecimal(e.to_string()))
    }

    /// Stored credential for verification
    pub fn credential(&self) -> Credential {
        Credential::from_parts(&self.password_salt, &self.password_hash)
    }

    /// Convert into the domain account type
    pub fn into_account(self) -> PersistenceResult<Account> {
        let balance = self.balance()?;
        Ok(Account {
            id: self.id,
            holder: self.account_holder,
            number: self.account_number,
            balance,
        })
    }
}

/// Row type for the `transactions` ledger table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub account_holder: String,
    pub account_number: i64,
    pub transaction_type: String,
    pub amount: String, // Decimal stored as TEXT
    pub timestamp: DateTime<Utc>,
}

impl TransactionRow {
    /// Recorded amount as a Decimal
    pub fn amount(&self) -> PersistenceResult<Decimal> {
        Decimal::from_str(&self.amount)
            .map_err(|e| PersistenceError::InvalidDecimal(e.to_string()))
    }
}
