//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendcast - Track expenses and see where next month is heading
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Personal expense tracker with a next-month forecast", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendcast.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Category: Food, Transport, Entertainment, Technology, Health, Other
        #[arg(short, long)]
        category: String,

        /// Amount spent (at least 1)
        #[arg(short, long)]
        amount: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List every recorded expense
    List,

    /// Delete every recorded expense
    DeleteAll,

    /// Show totals and category shares for a date range
    Report {
        /// Start date (YYYY-MM-DD), defaults to the earliest expense
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), defaults to the latest expense
        #[arg(long)]
        to: Option<String>,

        /// Only include these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
    },

    /// Predict next month's spend per category
    Forecast,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
