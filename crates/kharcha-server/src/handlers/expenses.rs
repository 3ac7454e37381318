//! Expense record handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, AuthUser, SuccessResponse};
use kharcha_core::models::{ExpenseRecord, NewExpense};

/// GET /api/expenses - the user's records, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
) -> Result<Json<Vec<ExpenseRecord>>, AppError> {
    let records = state.db.list_expenses(&email).map_err(AppError::from_core)?;
    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub name: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: Option<String>,
    /// Explicit bucket choice for a new category/subcategory pair;
    /// omitted for known pairs
    pub bucket: Option<String>,
    pub spent_by: Option<String>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
    pub other_income: Option<f64>,
}

#[derive(Serialize)]
pub struct CreateExpenseResponse {
    pub id: i64,
    /// The bucket frozen onto the record
    pub bucket: String,
}

/// POST /api/expenses - record an expense
///
/// Resolves the budget bucket at entry time (explicit choice → stored
/// binding → static map) and freezes it onto the record.
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<CreateExpenseResponse>, AppError> {
    if req.category.trim().is_empty() {
        return Err(AppError::bad_request("Category must not be empty"));
    }
    if req.amount < 0.0 {
        return Err(AppError::bad_request("Amount must be non-negative"));
    }
    let other_income = req.other_income.unwrap_or(0.0);
    if other_income < 0.0 {
        return Err(AppError::bad_request("Other income must be non-negative"));
    }

    let subcategory = req.subcategory.clone().unwrap_or_default();
    let bucket = state
        .db
        .resolve_entry_bucket(
            &state.categories,
            &req.category,
            &subcategory,
            req.bucket.as_deref(),
        )
        .map_err(AppError::from_core)?;

    let expense = NewExpense {
        name: req.name,
        date: req.date,
        amount: req.amount,
        category: req.category,
        subcategory: req.subcategory,
        bucket: bucket.clone(),
        spent_by: req.spent_by,
        payment_mode: req.payment_mode,
        notes: req.notes,
        other_income,
    };

    let id = state
        .db
        .add_expense(&email, &expense)
        .map_err(AppError::from_core)?;

    Ok(Json(CreateExpenseResponse { id, bucket }))
}

/// DELETE /api/expenses/:id - delete one of the user's records
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let deleted = state
        .db
        .delete_expense(id, &email)
        .map_err(AppError::from_core)?;

    if !deleted {
        return Err(AppError::not_found("Expense not found"));
    }

    Ok(Json(SuccessResponse { success: true }))
}
