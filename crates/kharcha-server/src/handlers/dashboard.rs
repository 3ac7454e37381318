//! Dashboard handlers: month selection and the monthly analysis view

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, AuthUser};
use kharcha_core::analysis::{
    analyze_budget, available_months, default_month, generate_insights, parse_month_key, summarize,
};
use kharcha_core::models::{BudgetRow, MonthList, MonthlySummary};

/// GET /api/months - available months for selection, most recent first
pub async fn list_months(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
) -> Result<Json<MonthList>, AppError> {
    let records = state.db.list_expenses(&email).map_err(AppError::from_core)?;
    let months = available_months(&records);
    let default = default_month(&months);

    Ok(Json(MonthList { months, default }))
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Month key "YYYY-MM"; defaults to the current month if present,
    /// else the most recent month with records
    pub month: Option<String>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub months: Vec<String>,
    pub month: String,
    pub summary: MonthlySummary,
    pub budget: Vec<BudgetRow>,
    pub insights: Vec<String>,
}

/// GET /api/dashboard - full monthly analysis for the selected month
///
/// Recomputes everything from the current expense store; nothing here
/// is cached.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = state
        .db
        .get_user_by_email(&email)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(ref month) = params.month {
        if parse_month_key(month).is_none() {
            return Err(AppError::bad_request("Invalid month format (use YYYY-MM)"));
        }
    }

    let records = state.db.list_expenses(&email).map_err(AppError::from_core)?;
    let months = available_months(&records);

    let month = params
        .month
        .or_else(|| default_month(&months))
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m").to_string());

    let summary = summarize(&records, user.salary, &month);
    let budget = analyze_budget(
        &summary.month_records,
        &state.budget,
        &state.categories,
        summary.income_total,
    );
    let insights = generate_insights(&budget, summary.savings_percent);

    Ok(Json(DashboardResponse {
        months,
        month,
        summary,
        budget,
        insights,
    }))
}
