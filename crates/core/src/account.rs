//! # Account Module
//!
//! The customer account and the kinds of ledger entries recorded
//! against it. Accounts are keyed by their numeric account number for
//! every operation; the holder name is display-only and not unique.

use crate::money::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Deposit,
    Withdrawal,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Deposit" => Some(TxKind::Deposit),
            "Withdrawal" => Some(TxKind::Withdrawal),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer account.
///
/// `number` is the unique login and operation key; `id` is the storage
/// surrogate. The balance is never negative after a committed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Storage surrogate key
    pub id: i64,
    /// Display name of the holder (not unique)
    pub holder: String,
    /// Unique account number used for login and all operations
    pub number: i64,
    /// Current balance, two fraction digits
    pub balance: Decimal,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (holder: {}, balance: ${})",
            self.number,
            self.holder,
            format_amount(self.balance)
        )
    }
}
