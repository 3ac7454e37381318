//! Kharcha Core Library
//!
//! Shared functionality for the Kharcha personal finance tracker:
//! - Database access and migrations (users, expenses, category bindings)
//! - User authentication (Argon2 password hashing, session tokens)
//! - Budget analysis engine (monthly aggregation, bucket limits, insights)
//! - Monthly report export (CSV/JSON)

pub mod analysis;
pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod report;

pub use analysis::{
    analyze_budget, available_months, default_month, generate_insights, parse_month_key, summarize,
    BudgetMap, CategoryMap, DEFAULT_BUCKET,
};
pub use db::Database;
pub use error::{Error, Result};
pub use report::{MonthlyReport, ReportDocument, ReportFormat};
