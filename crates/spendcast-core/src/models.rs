//! Domain models for Spendcast

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Smallest amount the entry form accepts
pub const MIN_AMOUNT: f64 = 1.0;

/// Increment used by the amount input
pub const AMOUNT_STEP: f64 = 100.0;

/// Expense category
///
/// Stored in the database as its canonical name (`"Food"`, `"Transport"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Technology,
    Health,
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 6] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Technology,
        Self::Health,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "technology" => Ok(Self::Technology),
            "health" => Ok(Self::Health),
            "other" => Ok(Self::Other),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
}

/// An expense to be saved (id is assigned by the store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: Category, amount: f64) -> Self {
        Self {
            date,
            category,
            amount,
        }
    }

    /// Check the constraints the entry form enforces
    pub fn validate(&self) -> crate::Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "amount must be a number, got {}",
                self.amount
            )));
        }
        if self.amount < MIN_AMOUNT {
            return Err(Error::InvalidData(format!(
                "amount must be at least {}, got {}",
                MIN_AMOUNT, self.amount
            )));
        }
        Ok(())
    }
}
