//! Repository implementations for SQLite
//!
//! Account CRUD plus the append-only transactions ledger. Repositories
//! take their executor as an argument: operations that must be atomic
//! pass an open transaction, everything else passes the pool.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountRow, TransactionRow};
use chrono::{DateTime, Utc};
use minibank_core::money::format_amount;
use minibank_core::{Credential, TxKind};
use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite, SqlitePool};
use std::str::FromStr;

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account row, returning the storage id.
    ///
    /// A second account with the same number maps to `AlreadyExists`.
    pub async fn insert(
        pool: &SqlitePool,
        holder: &str,
        number: i64,
        credential: &Credential,
        balance: Decimal,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO accounts (account_holder, account_number, password_hash, password_salt, balance)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(holder)
        .bind(number)
        .bind(&credential.digest)
        .bind(&credential.salt)
        .bind(format_amount(balance))
        .execute(pool)
        .await
        .map_err(|e| Self::map_insert_error(e, number))?;

        Ok(result.last_insert_rowid())
    }

    fn map_insert_error(err: sqlx::Error, number: i64) -> PersistenceError {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return PersistenceError::already_exists("Account", &number.to_string());
            }
        }
        PersistenceError::Database(err)
    }

    /// Look up an account by its account number
    pub async fn find_by_number<'e, E>(
        executor: E,
        number: i64,
    ) -> PersistenceResult<Option<AccountRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE account_number = ?",
        )
        .bind(number)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    /// Current balance for an account number, or None when no row matches
    pub async fn fetch_balance(
        pool: &SqlitePool,
        number: i64,
    ) -> PersistenceResult<Option<Decimal>> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT balance FROM accounts WHERE account_number = ?",
        )
        .bind(number)
        .fetch_optional(pool)
        .await?;

        match row {
            Some((text,)) => {
                let balance = Decimal::from_str(&text)
                    .map_err(|e| PersistenceError::InvalidDecimal(e.to_string()))?;
                Ok(Some(balance))
            }
            None => Ok(None),
        }
    }

    /// Guarded balance update: writes `new` only while the stored balance
    /// still equals `old`. Returns false when the row changed underneath
    /// the caller (lost-update guard).
    pub async fn update_balance_guarded<'e, E>(
        executor: E,
        number: i64,
        old: Decimal,
        new: Decimal,
    ) -> PersistenceResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE accounts SET balance = ? WHERE account_number = ? AND balance = ?",
        )
        .bind(format_amount(new))
        .bind(number)
        .bind(format_amount(old))
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// Transactions Ledger
// ============================================================================

/// Repository for the transactions ledger. Append-only: no update or
/// delete exists anywhere in the crate.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Append one immutable ledger row
    pub async fn append<'e, E>(
        executor: E,
        holder: &str,
        number: i64,
        kind: TxKind,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO transactions (account_holder, account_number, transaction_type, amount, timestamp)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(holder)
        .bind(number)
        .bind(kind.as_str())
        .bind(format_amount(amount))
        .bind(timestamp)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// All ledger rows for an account number, in insertion order
    pub async fn list_for_account(
        pool: &SqlitePool,
        number: i64,
    ) -> PersistenceResult<Vec<TransactionRow>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_number = ? ORDER BY id",
        )
        .bind(number)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
