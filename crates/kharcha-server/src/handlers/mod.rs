//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod reports;

// Re-export all handlers for use in router
pub use auth::*;
pub use categories::*;
pub use dashboard::*;
pub use expenses::*;
pub use reports::*;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health - liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
