//! Expense handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use spendcast_core::{Category, Error as CoreError, Expense, NewExpense};

/// GET /api/expenses - List every expense
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state.db.list_expenses()?;
    Ok(Json(expenses))
}

/// Request body for saving an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Date (YYYY-MM-DD)
    pub date: String,
    pub category: String,
    pub amount: f64,
}

impl CreateExpenseRequest {
    fn into_new_expense(self) -> Result<NewExpense, AppError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;
        let category: Category = self
            .category
            .parse()
            .map_err(|_| AppError::bad_request("Unknown category"))?;
        Ok(NewExpense::new(date, category, self.amount))
    }
}

#[derive(Serialize)]
pub struct CreateExpenseResponse {
    pub id: i64,
}

/// POST /api/expenses - Save an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<CreateExpenseResponse>, AppError> {
    let expense = req.into_new_expense()?;

    let id = state.db.insert_expense(&expense).map_err(|e| match e {
        CoreError::InvalidData(msg) => AppError::bad_request(&msg),
        other => AppError::from(other),
    })?;

    Ok(Json(CreateExpenseResponse { id }))
}

#[derive(Serialize)]
pub struct DeleteAllResponse {
    pub deleted: usize,
}

/// DELETE /api/expenses - Delete every expense
pub async fn delete_all_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteAllResponse>, AppError> {
    let deleted = state.db.delete_all_expenses()?;
    Ok(Json(DeleteAllResponse { deleted }))
}

/// GET /api/categories - The fixed category list
pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.as_str()).collect())
}
