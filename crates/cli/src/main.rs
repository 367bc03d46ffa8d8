//! Minibank CLI - interactive banking over a local SQLite database
//!
//! Usage:
//! ```bash
//! minibank
//! minibank --db data/minibank.db
//! ```
//!
//! Everything past startup is menu-driven on stdin/stdout; `--db` is the
//! one configuration knob.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod shell;

/// Minibank - a menu-driven banking demo on SQLite
#[derive(Parser)]
#[command(name = "minibank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/minibank.db")]
    pub db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Ensure the data directory exists
    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // A connection failure here is the one fatal error: without storage
    // the shell has nothing to run against.
    let pool = minibank_persistence::init_database(&cli.db)
        .await
        .with_context(|| format!("Failed to open database at {:?}", cli.db))?;

    info!(db = %cli.db.display(), "database ready");

    let result = shell::run(&pool).await;

    pool.close().await;
    result
}
