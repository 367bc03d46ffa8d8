//! # Minibank Business
//!
//! Business logic layer: the `Teller` implements every banking operation
//! (open account, login, balance, deposit, withdraw, statement) over an
//! injected SQLite pool. Balance mutation and ledger append always commit
//! together inside one database transaction.

pub mod error;
pub mod teller;

pub use error::{BankError, BankResult};
pub use teller::Teller;
