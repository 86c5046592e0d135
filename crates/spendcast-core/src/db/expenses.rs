//! Expense operations

use chrono::NaiveDate;
use rusqlite::params;
use tracing::{debug, info, warn};

use super::Database;
use crate::error::Result;
use crate::models::{Category, Expense, NewExpense};

impl Database {
    /// Insert an expense and return its new ID
    ///
    /// The write is committed before returning.
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        expense.validate()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO expenses (date, category, amount) VALUES (?, ?, ?)",
            params![
                expense.date.format("%Y-%m-%d").to_string(),
                expense.category.as_str(),
                expense.amount,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            id,
            date = %expense.date,
            category = %expense.category,
            amount = expense.amount,
            "Expense saved"
        );
        Ok(id)
    }

    /// Delete every expense, returning how many rows were removed
    pub fn delete_all_expenses(&self) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM expenses", [])?;
        tx.commit()?;

        warn!(deleted, "All expenses deleted");
        Ok(deleted)
    }

    /// Load every expense, oldest first
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, date, category, amount FROM expenses ORDER BY date, id")?;

        let expenses = stmt
            .query_map([], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = expenses.len(), "Loaded expenses");
        Ok(expenses)
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Map a row to an Expense
    ///
    /// The table accepts any text, so unparseable dates or categories surface
    /// as conversion failures rather than being silently replaced.
    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(1)?;
        let category_str: String = row.get(2)?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let category: Category = category_str.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Expense {
            id: row.get(0)?,
            date,
            category,
            amount: row.get(3)?,
        })
    }
}
