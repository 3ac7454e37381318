//! Report download handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser};
use kharcha_core::analysis::parse_month_key;
use kharcha_core::report::{monthly_report, ReportFormat};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// csv (default) or json
    pub format: Option<String>,
}

/// GET /api/reports/:month - download the month's report
pub async fn download_report(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
    Path(month): Path<String>,
    Query(params): Query<ReportQuery>,
) -> Result<Response, AppError> {
    if parse_month_key(&month).is_none() {
        return Err(AppError::bad_request("Invalid month format (use YYYY-MM)"));
    }

    let format: ReportFormat = params
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let report = monthly_report(
        &state.db,
        &state.budget,
        &state.categories,
        &email,
        &month,
        format,
    )
    .map_err(AppError::from_core)?;

    let headers = [
        (header::CONTENT_TYPE, report.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename),
        ),
    ];

    Ok((headers, report.bytes).into_response())
}
