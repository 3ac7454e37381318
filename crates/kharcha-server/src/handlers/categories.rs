//! Category taxonomy handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use kharcha_core::analysis::DEFAULT_BUCKET;
use kharcha_core::models::CategoryBinding;

#[derive(Serialize)]
pub struct CategoryPair {
    pub category: String,
    pub bucket: String,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    /// Static category → bucket defaults
    pub defaults: Vec<CategoryPair>,
    /// User-introduced category/subcategory bindings
    pub bindings: Vec<CategoryBinding>,
    /// Buckets known to the budget configuration
    pub buckets: Vec<String>,
}

/// GET /api/categories - the full taxonomy (defaults + stored bindings)
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let defaults = state
        .categories
        .iter()
        .map(|(category, bucket)| CategoryPair {
            category: category.to_string(),
            bucket: bucket.to_string(),
        })
        .collect();

    let bindings = state.db.list_bindings().map_err(AppError::from_core)?;

    let buckets = state
        .budget
        .iter()
        .map(|(bucket, _)| bucket.to_string())
        .collect();

    Ok(Json(CategoriesResponse {
        defaults,
        bindings,
        buckets,
    }))
}

#[derive(Deserialize)]
pub struct BindCategoryRequest {
    pub category: String,
    pub subcategory: Option<String>,
    /// Defaults to the Lifestyle + Personal bucket when omitted
    pub bucket: Option<String>,
}

/// POST /api/categories - bind a category/subcategory pair to a bucket
///
/// Affects future expense entries only; stored records keep the bucket
/// frozen at their entry time.
pub async fn bind_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BindCategoryRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if req.category.trim().is_empty() {
        return Err(AppError::bad_request("Category must not be empty"));
    }

    let subcategory = req.subcategory.unwrap_or_default();
    let bucket = req.bucket.as_deref().unwrap_or(DEFAULT_BUCKET);

    state
        .db
        .bind_category(&req.category, &subcategory, bucket)
        .map_err(AppError::from_core)?;

    Ok(Json(SuccessResponse { success: true }))
}
