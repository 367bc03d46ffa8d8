//! # Minibank Core
//!
//! Core domain types for Minibank - monetary amounts, accounts, ledger
//! entry kinds, and password credentials. No I/O lives here; the
//! persistence and business crates build on these types.

pub mod account;
pub mod credentials;
pub mod error;
pub mod money;

pub use account::{Account, TxKind};
pub use credentials::{Credential, CredentialVerifier, SaltedSha256};
pub use error::{CoreError, CoreResult};
pub use money::{format_amount, parse_amount};
