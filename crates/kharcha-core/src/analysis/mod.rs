//! Budget analysis engine
//!
//! This module is organized by stage:
//! - `categories` - category → bucket resolution
//! - `summary` - monthly aggregation (expense/income/savings)
//! - `budget` - bucket-level budget-vs-actual classification
//! - `insights` - qualitative observations derived from the analysis
//!
//! Everything here is pure in-memory reduction over an already-fetched
//! record set: no I/O, no caching, no error paths. Empty inputs degrade
//! to zero-valued summaries and empty sequences.

pub mod budget;
pub mod categories;
pub mod insights;
pub mod summary;

pub use budget::{analyze_budget, BudgetMap};
pub use categories::{CategoryMap, DEFAULT_BUCKET};
pub use insights::generate_insights;
pub use summary::{available_months, default_month, parse_month_key, summarize};
