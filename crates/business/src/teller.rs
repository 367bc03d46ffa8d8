//! Teller operations - open account, login, balance, deposit, withdraw,
//! statement
//!
//! Every operation is keyed by the account number and borrows the
//! connection pool; nothing here holds global state. Deposits and
//! withdrawals run their balance read, guarded update, and ledger append
//! inside a single database transaction, so either both writes commit or
//! neither does.

use crate::error::{BankError, BankResult};
use chrono::Utc;
use minibank_core::{Account, Credential, CredentialVerifier, SaltedSha256, TxKind};
use minibank_persistence::{AccountRepo, LedgerRepo, PersistenceError, TransactionRow};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Banking operations over an injected connection pool.
pub struct Teller<'a> {
    pool: &'a SqlitePool,
    verifier: SaltedSha256,
}

impl<'a> Teller<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            verifier: SaltedSha256,
        }
    }

    /// Open a new account with an initial balance.
    ///
    /// The password is salted and hashed before it reaches storage. A
    /// duplicate account number fails with `AccountExists` and persists
    /// nothing.
    pub async fn open_account(
        &self,
        holder: &str,
        number: i64,
        password: &str,
        initial_balance: Decimal,
    ) -> BankResult<Account> {
        if initial_balance < Decimal::ZERO {
            return Err(BankError::InvalidAmount(format!(
                "initial balance must not be negative: {}",
                initial_balance
            )));
        }

        let credential = Credential::hash(password);
        let id = AccountRepo::insert(self.pool, holder, number, &credential, initial_balance)
            .await
            .map_err(|e| match e {
                PersistenceError::AlreadyExists { .. } => BankError::AccountExists(number),
                other => BankError::Persistence(other),
            })?;

        info!(account = number, "account opened");
        Ok(Account {
            id,
            holder: holder.to_string(),
            number,
            balance: initial_balance,
        })
    }

    /// Authenticate by account number and password.
    ///
    /// A mismatch - unknown number or wrong password - is a normal
    /// outcome (`None`), never an error.
    pub async fn login(&self, number: i64, password: &str) -> BankResult<Option<Account>> {
        let row = match AccountRepo::find_by_number(self.pool, number).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        if !self.verifier.verify(&row.credential(), password) {
            debug!(account = number, "credential mismatch");
            return Ok(None);
        }

        Ok(Some(row.into_account()?))
    }

    /// Current balance for an account number.
    pub async fn balance(&self, number: i64) -> BankResult<Decimal> {
        AccountRepo::fetch_balance(self.pool, number)
            .await?
            .ok_or(BankError::AccountNotFound(number))
    }

    /// Deposit into an account; returns the new balance.
    pub async fn deposit(&self, number: i64, amount: Decimal) -> BankResult<Decimal> {
        self.apply(number, TxKind::Deposit, amount).await
    }

    /// Withdraw from an account; rejects amounts above the current
    /// balance. Returns the new balance.
    pub async fn withdraw(&self, number: i64, amount: Decimal) -> BankResult<Decimal> {
        self.apply(number, TxKind::Withdrawal, amount).await
    }

    /// Shared read-check-write path for deposits and withdrawals.
    ///
    /// An early return before the commit rolls the transaction back, so
    /// rejections leave no trace. The guarded update turns a lost update
    /// into `Conflict` instead of silently overwriting.
    async fn apply(&self, number: i64, kind: TxKind, amount: Decimal) -> BankResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount(format!(
                "{} amount must be positive: {}",
                kind, amount
            )));
        }

        let mut tx = self.pool.begin().await.map_err(PersistenceError::from)?;

        let row = AccountRepo::find_by_number(&mut *tx, number)
            .await?
            .ok_or(BankError::AccountNotFound(number))?;
        let balance = row.balance()?;

        if kind == TxKind::Withdrawal && amount > balance {
            return Err(BankError::insufficient_funds(amount, balance));
        }

        let new_balance = match kind {
            TxKind::Deposit => balance + amount,
            TxKind::Withdrawal => balance - amount,
        };

        let swapped =
            AccountRepo::update_balance_guarded(&mut *tx, number, balance, new_balance).await?;
        if !swapped {
            return Err(BankError::Conflict(number));
        }

        LedgerRepo::append(
            &mut *tx,
            &row.account_holder,
            number,
            kind,
            amount,
            Utc::now(),
        )
        .await?;

        tx.commit().await.map_err(PersistenceError::from)?;

        info!(account = number, kind = kind.as_str(), %amount, "transaction committed");
        Ok(new_balance)
    }

    /// Full ledger for an account, oldest first.
    ///
    /// An unknown account number is `AccountNotFound`; an existing
    /// account with no activity yields an empty list, which the caller
    /// renders as "no transactions".
    pub async fn statement(&self, number: i64) -> BankResult<Vec<TransactionRow>> {
        if AccountRepo::find_by_number(self.pool, number).await?.is_none() {
            return Err(BankError::AccountNotFound(number));
        }
        Ok(LedgerRepo::list_for_account(self.pool, number).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minibank_persistence::init_database;
    use rust_decimal_macros::dec;
    use tempfile::{tempdir, TempDir};

    async fn test_pool(dir: &TempDir) -> SqlitePool {
        init_database(&dir.path().join("bank.db")).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_deposit_withdraw_workflow() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        let account = teller
            .open_account("Alice", 1001, "pw", dec!(100.00))
            .await
            .unwrap();
        assert_eq!(account.number, 1001);
        assert_eq!(account.balance, dec!(100.00));

        // Deposit 50: balance becomes 150.00, one Deposit row appended
        let balance = teller.deposit(1001, dec!(50)).await.unwrap();
        assert_eq!(balance, dec!(150.00));

        // Withdraw 200: rejected, balance and ledger unchanged
        let err = teller.withdraw(1001, dec!(200)).await.unwrap_err();
        assert!(matches!(
            err,
            BankError::InsufficientFunds {
                requested: _,
                available: _
            }
        ));
        assert_eq!(teller.balance(1001).await.unwrap(), dec!(150.00));

        // Withdraw 150: balance becomes 0.00, one Withdrawal row appended
        let balance = teller.withdraw(1001, dec!(150)).await.unwrap();
        assert_eq!(balance, dec!(0));

        let rows = teller.statement(1001).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction_type, "Deposit");
        assert_eq!(rows[0].amount, "50.00");
        assert_eq!(rows[1].transaction_type, "Withdrawal");
        assert_eq!(rows[1].amount, "150.00");
        assert_eq!(rows[0].account_number, 1001);
        assert_eq!(rows[0].account_holder, "Alice");
    }

    #[tokio::test]
    async fn test_rejected_withdrawal_appends_no_ledger_row() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Bob", 2002, "pw", dec!(10))
            .await
            .unwrap();

        assert!(teller.withdraw(2002, dec!(10.01)).await.is_err());
        assert_eq!(teller.balance(2002).await.unwrap(), dec!(10));
        assert!(teller.statement(2002).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Carol", 3003, "secret", dec!(0))
            .await
            .unwrap();

        let account = teller.login(3003, "secret").await.unwrap().unwrap();
        assert_eq!(account.holder, "Carol");
        assert_eq!(account.number, 3003);

        assert!(teller.login(3003, "wrong").await.unwrap().is_none());
        assert!(teller.login(9999, "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_account_number() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Dave", 4004, "pw", dec!(0))
            .await
            .unwrap();

        let err = teller
            .open_account("Another Dave", 4004, "pw2", dec!(0))
            .await
            .unwrap_err();
        assert!(matches!(err, BankError::AccountExists(4004)));
    }

    #[tokio::test]
    async fn test_negative_initial_balance_rejected() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        let err = teller
            .open_account("Eve", 5005, "pw", dec!(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_zero_and_negative_amounts_rejected() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Frank", 6006, "pw", dec!(100))
            .await
            .unwrap();

        assert!(matches!(
            teller.deposit(6006, dec!(0)).await.unwrap_err(),
            BankError::InvalidAmount(_)
        ));
        assert!(matches!(
            teller.withdraw(6006, dec!(-5)).await.unwrap_err(),
            BankError::InvalidAmount(_)
        ));
        assert_eq!(teller.balance(6006).await.unwrap(), dec!(100));
    }

    #[tokio::test]
    async fn test_operations_on_unknown_account() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        assert!(matches!(
            teller.balance(7777).await.unwrap_err(),
            BankError::AccountNotFound(7777)
        ));
        assert!(matches!(
            teller.deposit(7777, dec!(1)).await.unwrap_err(),
            BankError::AccountNotFound(7777)
        ));
        assert!(matches!(
            teller.statement(7777).await.unwrap_err(),
            BankError::AccountNotFound(7777)
        ));
    }

    #[tokio::test]
    async fn test_withdraw_exact_balance_reaches_zero() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Grace", 8008, "pw", dec!(25.75))
            .await
            .unwrap();

        let balance = teller.withdraw(8008, dec!(25.75)).await.unwrap();
        assert_eq!(balance, Decimal::ZERO);

        // Balance invariant: never negative after a committed operation
        assert!(teller.withdraw(8008, dec!(0.01)).await.is_err());
        assert_eq!(teller.balance(8008).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_two_accounts_same_holder_name_stay_separate() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let teller = Teller::new(&pool);

        teller
            .open_account("Heidi", 9001, "pw1", dec!(100))
            .await
            .unwrap();
        teller
            .open_account("Heidi", 9002, "pw2", dec!(200))
            .await
            .unwrap();

        teller.deposit(9001, dec!(10)).await.unwrap();

        // Operations are keyed by number, so the shared name is harmless
        assert_eq!(teller.balance(9001).await.unwrap(), dec!(110));
        assert_eq!(teller.balance(9002).await.unwrap(), dec!(200));
        assert_eq!(teller.statement(9001).await.unwrap().len(), 1);
        assert!(teller.statement(9002).await.unwrap().is_empty());
    }
}
