//! Spendcast CLI - Personal expense tracker with next-month forecast
//!
//! Usage:
//!   spendcast init                                   Initialize database
//!   spendcast add --category Food --amount 250       Record an expense
//!   spendcast report --from 2024-01-01 --category Food
//!   spendcast forecast                               Predict next month
//!   spendcast serve --port 3000                      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn parse_date_arg(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid --{} date format (use YYYY-MM-DD)", flag))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            category,
            amount,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            let date = parse_date_arg(date.as_deref(), "date")?;
            commands::cmd_add(&db, &category, amount, date)
        }
        Commands::List => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db)
        }
        Commands::DeleteAll => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete_all(&db)
        }
        Commands::Report { from, to, category } => {
            let db = commands::open_db(&cli.db)?;
            let from = parse_date_arg(from.as_deref(), "from")?;
            let to = parse_date_arg(to.as_deref(), "to")?;
            commands::cmd_report(&db, from, to, &category)
        }
        Commands::Forecast => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_forecast(&db)
        }
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
    }
}
