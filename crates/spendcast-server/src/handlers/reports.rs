//! Report and forecast handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AppError, AppState};
use spendcast_core::{build_report, forecast_next_month, Category, Forecast, Report, ReportFilter};

/// Parse an optional YYYY-MM-DD query value
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d"))
        .transpose()
        .map_err(|_| format!("Invalid {} date format (use YYYY-MM-DD)", field))
}

/// Parse category names, rejecting unknown ones
pub(crate) fn parse_categories<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Category>, String> {
    let mut categories = Vec::new();
    for name in names {
        let category: Category = name
            .parse()
            .map_err(|_| format!("Unknown category: {}", name))?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(categories)
}

/// Query parameters for the report
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Start date (YYYY-MM-DD), defaults to the earliest expense
    pub start: Option<String>,
    /// End date (YYYY-MM-DD), defaults to the latest expense
    pub end: Option<String>,
    /// Comma-separated category names, defaults to every category present.
    /// An empty value selects nothing.
    pub categories: Option<String>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    /// Filter actually applied; null when no expenses are recorded
    pub filter: Option<ReportFilter>,
    /// Null when nothing matches the filter
    pub report: Option<Report>,
}

/// GET /api/report - Filtered report with totals and category shares
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let start =
        parse_optional_date(params.start.as_deref(), "start").map_err(|e| AppError::bad_request(&e))?;
    let end =
        parse_optional_date(params.end.as_deref(), "end").map_err(|e| AppError::bad_request(&e))?;
    let categories = params
        .categories
        .as_deref()
        .map(|s| parse_categories(s.split(',').map(str::trim).filter(|s| !s.is_empty())))
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    let records = state.db.list_expenses()?;
    let filter = ReportFilter::with_overrides(&records, start, end, categories);
    let report = filter.as_ref().and_then(|f| build_report(&records, f));

    debug!(
        records = records.len(),
        matched = report.as_ref().map(|r| r.expenses.len()).unwrap_or(0),
        "Report built"
    );

    Ok(Json(ReportResponse { filter, report }))
}

/// GET /api/forecast - Next month's predicted spend per category
pub async fn get_forecast(State(state): State<Arc<AppState>>) -> Result<Json<Forecast>, AppError> {
    let records = state.db.list_expenses()?;
    Ok(Json(forecast_next_month(&records)))
}
