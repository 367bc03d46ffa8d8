//! # Minibank Persistence
//!
//! SQLite persistence for Minibank: schema bootstrap plus the account
//! repository and the append-only transactions ledger, all over a
//! `sqlx` connection pool.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use minibank_persistence::{init_database, AccountRepo, LedgerRepo};
//!
//! let pool = init_database(Path::new("data/minibank.db")).await?;
//! let account = AccountRepo::find_by_number(&pool, 1001).await?;
//! let rows = LedgerRepo::list_for_account(&pool, 1001).await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::schema::{AccountRow, TransactionRow};
pub use sqlite::{create_schema, init_database, AccountRepo, LedgerRepo};
