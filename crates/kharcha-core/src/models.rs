//! Domain models for Kharcha

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Date of birth as entered (used for password reset verification)
    pub dob: Option<String>,
    /// Fixed monthly salary, the income baseline for every month
    pub salary: f64,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new user to be created (before DB insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Plain-text password from the signup form; hashed before storage
    pub password: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub salary: f64,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub address: Option<String>,
}

/// A single expense entry
///
/// `bucket` is the budget bucket resolved when the expense was recorded.
/// It is a frozen snapshot: later changes to the category taxonomy never
/// rewrite it, so historical reports stay stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub user_email: String,
    /// Short label for the entry (e.g., "Weekly groceries")
    pub name: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: Option<String>,
    /// Budget bucket frozen at entry time
    pub bucket: String,
    pub spent_by: Option<String>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
    /// Incidental income recorded alongside this entry
    pub other_income: f64,
    pub created_at: DateTime<Utc>,
}

/// A new expense to be recorded (before DB insertion)
///
/// The caller resolves and supplies `bucket`; see
/// [`crate::db::Database::resolve_entry_bucket`].
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: Option<String>,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: Option<String>,
    pub bucket: String,
    pub spent_by: Option<String>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
    pub other_income: f64,
}

/// A persisted category/subcategory → bucket binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBinding {
    pub id: i64,
    pub category: String,
    pub subcategory: String,
    pub bucket: String,
    pub created_at: DateTime<Utc>,
}

/// Derived figures for one user for one selected month
///
/// Never persisted; recomputed from the expense store on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Selected month key ("YYYY-MM")
    pub month: String,
    pub expense_total: f64,
    pub income_total: f64,
    /// May be negative when the month's spend exceeds income
    pub savings: f64,
    pub savings_percent: f64,
    /// The records that fell inside the selected month
    pub month_records: Vec<ExpenseRecord>,
}

/// Whether a bucket's spend stayed within its monthly limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Overspent,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Overspent => "overspent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Overspent => "Overspent",
        }
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "overspent" => Ok(Self::Overspent),
            _ => Err(format!("Unknown budget status: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One bucket's budget-vs-actual line for a selected month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRow {
    pub bucket: String,
    /// Display string of the categories that roll up into this bucket
    pub categories: String,
    /// Allotted amount: income * bucket percent, rounded to 2 decimals
    pub limit: f64,
    /// Actual spend attributed via each record's frozen bucket
    pub spent: f64,
    pub status: BudgetStatus,
}

/// Month list with the default selection for dashboards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthList {
    /// Distinct "YYYY-MM" keys, most recent first
    pub months: Vec<String>,
    /// Current calendar month if present, else the most recent
    pub default: Option<String>,
}
