//! CLI command tests

use chrono::NaiveDate;
use clap::Parser;
use spendcast_core::{Category, Database};
use tempfile::TempDir;

use crate::cli::{Cli, Commands};
use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ========== Init Tests ==========

#[test]
fn test_cmd_init_creates_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spendcast.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    // Running it again is harmless
    commands::cmd_init(&path).unwrap();
}

#[test]
fn test_open_db_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("spendcast.db");

    let err = commands::open_db(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to open database"));
}

// ========== Expense Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();
    commands::cmd_add(&db, "food", 250.0, Some(date("2024-05-01"))).unwrap();

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, Category::Food);
    assert_eq!(expenses[0].amount, 250.0);
    assert_eq!(expenses[0].date, date("2024-05-01"));

    let conn = db.conn().unwrap();
    let stored: String = conn
        .query_row("SELECT date FROM expenses", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "2024-05-01");
}

#[test]
fn test_cmd_add_defaults_to_today() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Health", 40.0, None).unwrap();

    let expenses = db.list_expenses().unwrap();
    let today = chrono::Local::now().date_naive();
    // Tolerate a midnight rollover between the two calls
    assert!((expenses[0].date - today).num_days().abs() <= 1);
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();
    assert!(commands::cmd_add(&db, "Groceries", 10.0, None).is_err());
    assert!(commands::cmd_add(&db, "Food", 0.0, None).is_err());
    assert!(commands::cmd_add(&db, "Food", f64::NAN, None).is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    assert!(commands::cmd_list(&db).is_ok());

    commands::cmd_add(&db, "Transport", 12.5, Some(date("2024-05-02"))).unwrap();
    assert!(commands::cmd_list(&db).is_ok());
}

#[test]
fn test_cmd_delete_all() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Food", 10.0, Some(date("2024-05-01"))).unwrap();
    commands::cmd_add(&db, "Other", 20.0, Some(date("2024-05-02"))).unwrap();

    commands::cmd_delete_all(&db).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_delete_all_needs_no_confirmation() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Food", 50.0, Some(date("2024-05-01"))).unwrap();

    // Runs without reading stdin and removes the row straight away
    commands::cmd_delete_all(&db).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);

    // Deleting from an empty store is fine too
    commands::cmd_delete_all(&db).unwrap();
    assert!(db.list_expenses().unwrap().is_empty());
}

#[test]
fn test_delete_all_takes_no_confirmation_flag() {
    let cli = Cli::try_parse_from(["spendcast", "delete-all"]).unwrap();
    assert!(matches!(cli.command, Commands::DeleteAll));

    assert!(Cli::try_parse_from(["spendcast", "delete-all", "--yes"]).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report_empty_store() {
    let db = setup_test_db();
    assert!(commands::cmd_report(&db, None, None, &[]).is_ok());
}

#[test]
fn test_cmd_report_with_filters() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Food", 100.0, Some(date("2024-01-05"))).unwrap();
    commands::cmd_add(&db, "Transport", 20.0, Some(date("2024-02-05"))).unwrap();

    assert!(commands::cmd_report(&db, None, None, &[]).is_ok());
    assert!(commands::cmd_report(
        &db,
        Some(date("2024-01-01")),
        Some(date("2024-01-31")),
        &["food".to_string()]
    )
    .is_ok());
    // Nothing in range is not an error
    assert!(commands::cmd_report(&db, Some(date("2025-01-01")), None, &[]).is_ok());
}

#[test]
fn test_cmd_report_unknown_category() {
    let db = setup_test_db();
    commands::cmd_add(&db, "Food", 100.0, Some(date("2024-01-05"))).unwrap();

    let err = commands::cmd_report(&db, None, None, &["Snacks".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Snacks"));
}

#[test]
fn test_cmd_forecast() {
    let db = setup_test_db();
    assert!(commands::cmd_forecast(&db).is_ok());

    commands::cmd_add(&db, "Food", 100.0, Some(date("2024-01-05"))).unwrap();
    commands::cmd_add(&db, "Food", 200.0, Some(date("2024-02-05"))).unwrap();
    assert!(commands::cmd_forecast(&db).is_ok());
}
