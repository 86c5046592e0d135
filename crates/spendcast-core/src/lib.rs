//! Spendcast Core Library
//!
//! Shared functionality for the Spendcast expense tracker:
//! - SQLite expense store with per-operation connections
//! - Filtered reports (total, average, category shares)
//! - Per-category next-month forecast by linear regression

pub mod db;
pub mod error;
pub mod forecast;
pub mod models;
pub mod report;

pub use db::Database;
pub use error::{Error, Result};
pub use forecast::{forecast_next_month, CategoryForecast, Forecast, LinearFit};
pub use models::{Category, Expense, NewExpense, AMOUNT_STEP, MIN_AMOUNT};
pub use report::{build_report, CategoryTotal, Report, ReportFilter};
