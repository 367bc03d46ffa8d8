//! SQLite storage: schema bootstrap and repositories.

pub mod repos;
pub mod schema;

pub use repos::{AccountRepo, LedgerRepo};

use crate::error::PersistenceResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Create both tables if they do not exist yet. Safe to call repeatedly;
/// a creation failure is returned, never swallowed.
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        -- Accounts, keyed by the unique numeric account number
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_holder TEXT NOT NULL,
            account_number INTEGER NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            balance TEXT NOT NULL DEFAULT '0.00'
        );

        -- Append-only ledger of deposits and withdrawals
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_holder TEXT NOT NULL,
            account_number INTEGER NOT NULL,
            transaction_type TEXT NOT NULL,
            amount TEXT NOT NULL,
            timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Open the database file (creating it if missing) and ensure the schema.
///
/// The pool is capped at a single connection: the shell uses storage
/// serially and every operation borrows this one handle.
pub async fn init_database(path: &Path) -> PersistenceResult<SqlitePool> {
    let db_url = format!("sqlite:{}?mode=rwc", path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}
