//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup (init) and shared utilities (open_db)
//! - `expenses` - Expense commands (add, list, delete-all)
//! - `reports` - Report and forecast commands
//! - `serve` - Web server command

pub mod core;
pub mod expenses;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use reports::*;
pub use serve::*;
