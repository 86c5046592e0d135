//! Expense command implementations

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use spendcast_core::{Category, Database, NewExpense};

pub fn cmd_add(
    db: &Database,
    category: &str,
    amount: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let category: Category = category.parse()?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let expense = NewExpense::new(date, category, amount);
    let id = db
        .insert_expense(&expense)
        .context("Failed to save expense")?;

    println!(
        "✅ Expense saved to database! (#{}: {} {} {:.2})",
        id, date, category, amount
    );
    Ok(())
}

pub fn cmd_list(db: &Database) -> Result<()> {
    let expenses = db.list_expenses()?;

    if expenses.is_empty() {
        println!("No expenses recorded yet.");
        println!("   Add one with: spendcast add --category Food --amount 250");
        return Ok(());
    }

    println!();
    println!("🧾 Expenses ({})", expenses.len());
    println!("   {:>5} │ {:10} │ {:13} │ {:>10}", "ID", "Date", "Category", "Amount");
    println!("   ──────┼────────────┼───────────────┼───────────");
    for expense in &expenses {
        println!(
            "   {:>5} │ {:10} │ {:13} │ {:>10.2}",
            expense.id,
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category,
            expense.amount
        );
    }
    println!();

    Ok(())
}

pub fn cmd_delete_all(db: &Database) -> Result<()> {
    let deleted = db
        .delete_all_expenses()
        .context("Failed to delete expenses")?;
    println!("⚠️  All expenses have been deleted! ({} removed)", deleted);

    Ok(())
}
