//! Monthly report export
//!
//! Assembles a user's selected month into a downloadable document:
//! CSV with one row per expense record, or a JSON bundle that also
//! carries the monthly summary, budget rows, and insights.

use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_budget, generate_insights, summarize, BudgetMap, CategoryMap};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetRow, ExpenseRecord};

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {} (valid: csv, json)", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendered report ready for download or writing to disk
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The JSON report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub user: String,
    pub email: String,
    pub month: String,
    pub expense_total: f64,
    pub income_total: f64,
    pub savings: f64,
    pub savings_percent: f64,
    pub records: Vec<ExpenseRecord>,
    pub budget: Vec<BudgetRow>,
    pub insights: Vec<String>,
}

/// Build the monthly report for a user
///
/// Fails with `NotFound` when the user is unknown, has no expense data
/// at all, or has no records in the selected month.
pub fn monthly_report(
    db: &Database,
    budget_map: &BudgetMap,
    categories: &CategoryMap,
    email: &str,
    month_key: &str,
    format: ReportFormat,
) -> Result<MonthlyReport> {
    let user = db
        .get_user_by_email(email)?
        .ok_or_else(|| Error::NotFound(format!("User not found: {}", email)))?;

    let records = db.list_expenses(email)?;
    if records.is_empty() {
        return Err(Error::NotFound(format!("No expense data for {}", email)));
    }

    let summary = summarize(&records, user.salary, month_key);
    if summary.month_records.is_empty() {
        return Err(Error::NotFound(format!(
            "No records for selected month: {}",
            month_key
        )));
    }

    let bytes = match format {
        ReportFormat::Csv => render_csv(&summary.month_records)?,
        ReportFormat::Json => {
            let budget = analyze_budget(
                &summary.month_records,
                budget_map,
                categories,
                summary.income_total,
            );
            let insights = generate_insights(&budget, summary.savings_percent);
            let document = ReportDocument {
                user: user.name,
                email: user.email,
                month: summary.month.clone(),
                expense_total: summary.expense_total,
                income_total: summary.income_total,
                savings: summary.savings,
                savings_percent: summary.savings_percent,
                records: summary.month_records,
                budget,
                insights,
            };
            serde_json::to_vec_pretty(&document)?
        }
    };

    Ok(MonthlyReport {
        filename: format!("expense-report-{}.{}", month_key, format.as_str()),
        content_type: format.content_type(),
        bytes,
    })
}

fn render_csv(records: &[ExpenseRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record([
        "date",
        "name",
        "amount",
        "category",
        "subcategory",
        "bucket",
        "payment_mode",
        "spent_by",
        "notes",
        "other_income",
    ])?;

    for record in records {
        wtr.write_record([
            record.date.to_string(),
            record.name.clone().unwrap_or_default(),
            format!("{:.2}", record.amount),
            record.category.clone(),
            record.subcategory.clone().unwrap_or_default(),
            record.bucket.clone(),
            record.payment_mode.clone().unwrap_or_default(),
            record.spent_by.clone().unwrap_or_default(),
            record.notes.clone().unwrap_or_default(),
            format!("{:.2}", record.other_income),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| Error::InvalidData(format!("CSV buffer error: {}", e)))
}
