//! Page handlers
//!
//! The page is re-rendered from scratch on every request: load all expenses,
//! apply the filter from the query string, build the report and forecast.
//! Form posts write to the store and redirect back to the page.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::reports::{parse_categories, parse_optional_date};
use crate::render::{self, Notice, PageView};
use crate::{AppState, PageError};
use spendcast_core::report::distinct_categories;
use spendcast_core::{
    build_report, forecast_next_month, Category, Error as CoreError, NewExpense, ReportFilter,
};

/// Page query string
///
/// Decoded from raw pairs because the category multi-select repeats
/// `category=` once per selected option.
#[derive(Debug, Default)]
struct PageQuery {
    start: Option<String>,
    end: Option<String>,
    categories: Vec<String>,
    /// Set by the filter form; without it the category selection defaults
    /// to every category present
    filtered: bool,
    notice: Option<String>,
}

impl PageQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "start" => query.start = Some(value),
                "end" => query.end = Some(value),
                "category" => query.categories.push(value),
                "filtered" => query.filtered = true,
                "notice" => query.notice = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// GET / - Entry form, filtered report, chart and forecast
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, PageError> {
    let query = PageQuery::from_pairs(pairs);

    let start =
        parse_optional_date(query.start.as_deref(), "start").map_err(|e| PageError::bad_request(&e))?;
    let end =
        parse_optional_date(query.end.as_deref(), "end").map_err(|e| PageError::bad_request(&e))?;
    let categories = if query.filtered {
        Some(
            parse_categories(query.categories.iter().map(String::as_str))
                .map_err(|e| PageError::bad_request(&e))?,
        )
    } else {
        None
    };

    let records = state.db.list_expenses()?;
    let filter = ReportFilter::with_overrides(&records, start, end, categories);
    let report = filter.as_ref().and_then(|f| build_report(&records, f));
    let forecast = forecast_next_month(&records);

    let view = PageView {
        notice: query.notice.as_deref().and_then(Notice::from_query),
        today: chrono::Local::now().date_naive(),
        available_categories: distinct_categories(&records),
        filter,
        report,
        forecast,
    };

    Ok(Html(render::page(&view)))
}

/// Fields posted by the entry form
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl ExpenseForm {
    fn into_new_expense(self) -> Result<NewExpense, PageError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| PageError::bad_request("Unknown expense category"))?;
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| PageError::bad_request("Amount must be a number"))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| PageError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;
        Ok(NewExpense::new(date, category, amount))
    }
}

/// POST /expenses - Save an expense from the entry form
pub async fn submit_expense(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect, PageError> {
    let expense = form.into_new_expense()?;

    state.db.insert_expense(&expense).map_err(|e| match e {
        CoreError::InvalidData(msg) => PageError::bad_request(&msg),
        other => PageError::from(other),
    })?;

    Ok(Redirect::to(Notice::Saved.location()))
}

/// POST /expenses/delete-all - Remove every expense
pub async fn submit_delete_all(State(state): State<Arc<AppState>>) -> Result<Redirect, PageError> {
    state.db.delete_all_expenses()?;
    Ok(Redirect::to(Notice::Deleted.location()))
}
