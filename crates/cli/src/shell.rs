//! Interactive shell: menus, input collection, dispatch to the teller
//!
//! The main menu branches to account creation or login; a successful
//! login enters the authenticated menu, which loops until logout.
//! Invalid selections print an error and re-prompt without a state
//! change; operation failures are printed and the current menu resumes.
//! EOF on stdin ends the program.

use anyhow::Result;
use minibank_business::{BankError, Teller};
use minibank_core::{money, Account, TxKind};
use sqlx::SqlitePool;
use std::io::{self, Write};

/// Run the interactive loop until stdin is exhausted.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    let teller = Teller::new(pool);

    loop {
        println!();
        println!("1. Create Account");
        println!("2. Login");
        let Some(choice) = prompt("Select an option (1 or 2): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => create_account_flow(&teller).await?,
            "2" => login_flow(&teller).await?,
            _ => println!("Invalid option. Please try again."),
        }
    }

    Ok(())
}

/// Collect the account details and open the account.
async fn create_account_flow(teller: &Teller<'_>) -> Result<()> {
    let Some(holder) = prompt("Enter account holder's name: ")? else {
        return Ok(());
    };
    let Some(number) = prompt("Enter account number: ")? else {
        return Ok(());
    };
    let Some(password) = prompt("Set a password: ")? else {
        return Ok(());
    };
    let Some(balance) = prompt("Enter initial balance: ")? else {
        return Ok(());
    };

    let number: i64 = match number.parse() {
        Ok(n) => n,
        Err(_) => {
            println!("Invalid account number: '{}'", number);
            return Ok(());
        }
    };

    let initial_balance = match money::parse_amount(&balance) {
        Ok(amount) => amount,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    match teller
        .open_account(&holder, number, &password, initial_balance)
        .await
    {
        Ok(account) => println!("Account created successfully! {}", account),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

/// Authenticate and, on success, enter the authenticated menu.
async fn login_flow(teller: &Teller<'_>) -> Result<()> {
    let Some(number) = prompt("Enter account number: ")? else {
        return Ok(());
    };
    let number: i64 = match number.parse() {
        Ok(n) => n,
        Err(_) => {
            println!("Invalid account number: '{}'", number);
            return Ok(());
        }
    };
    let Some(password) = prompt("Enter password: ")? else {
        return Ok(());
    };

    match teller.login(number, &password).await {
        Ok(Some(account)) => {
            println!("Login successful! Welcome, {}!", account.holder);
            session(teller, &account).await?;
        }
        Ok(None) => println!("Login failed. Invalid account number or password."),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

/// The authenticated menu; loops until logout or EOF.
async fn session(teller: &Teller<'_>, account: &Account) -> Result<()> {
    loop {
        println!();
        println!("1. View Balance");
        println!("2. Withdraw");
        println!("3. Deposit");
        println!("4. View Account Statement");
        println!("5. Logout");
        let Some(option) = prompt("Select an option (1-5): ")? else {
            return Ok(());
        };

        match option.as_str() {
            "1" => view_balance(teller, account).await,
            "2" => transact(teller, account, TxKind::Withdrawal).await?,
            "3" => transact(teller, account, TxKind::Deposit).await?,
            "4" => statement(teller, account).await,
            "5" => {
                println!("Logout successful.");
                return Ok(());
            }
            _ => println!("Invalid option. Please try again."),
        }
    }
}

async fn view_balance(teller: &Teller<'_>, account: &Account) {
    match teller.balance(account.number).await {
        Ok(balance) => println!(
            "Balance for {}: ${}",
            account.holder,
            money::format_amount(balance)
        ),
        Err(e) => println!("Error: {}", e),
    }
}

/// Prompt for an amount and run a deposit or withdrawal.
async fn transact(teller: &Teller<'_>, account: &Account, kind: TxKind) -> Result<()> {
    let label = match kind {
        TxKind::Withdrawal => "withdrawal",
        TxKind::Deposit => "deposit",
    };
    let Some(input) = prompt(&format!("Enter {} amount: ", label))? else {
        return Ok(());
    };

    let amount = match money::parse_amount(&input) {
        Ok(amount) => amount,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let outcome = match kind {
        TxKind::Withdrawal => teller.withdraw(account.number, amount).await,
        TxKind::Deposit => teller.deposit(account.number, amount).await,
    };

    match outcome {
        Ok(new_balance) => println!(
            "{} successful! New balance for {}: ${}",
            kind,
            account.holder,
            money::format_amount(new_balance)
        ),
        Err(BankError::InsufficientFunds { .. }) => println!("Insufficient funds."),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

async fn statement(teller: &Teller<'_>, account: &Account) {
    match teller.statement(account.number).await {
        Ok(rows) if rows.is_empty() => {
            println!("No transactions found for {}", account.holder)
        }
        Ok(rows) => {
            println!("Account Statement for {}:", account.holder);
            for row in rows {
                println!(
                    "ID: {}, Transaction Type: {}, Amount: ${}, Timestamp: {}",
                    row.id, row.transaction_type, row.amount, row.timestamp
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

/// Print a prompt and read one trimmed line; None means EOF.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
