//! Core command implementations and shared utilities

use std::path::Path;

use anyhow::{Context, Result};
use spendcast_core::Database;

/// Open the expense store, creating the table if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses().context("Failed to read expenses")?;
    println!("   {} expenses on record", count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: spendcast add --category Food --amount 250");
    println!("  2. Start web UI: spendcast serve");

    Ok(())
}
