//! Monthly aggregation
//!
//! Reduces a user's expense records to a single month's expense/income/
//! savings figures. Input records are assumed valid: the store boundary
//! excludes rows with unparseable dates before they get here.

use chrono::{Datelike, Utc};

use crate::models::{ExpenseRecord, MonthlySummary};

/// Parse a "YYYY-MM" month key into (year, month)
pub fn parse_month_key(month_key: &str) -> Option<(i32, u32)> {
    let (year, month) = month_key.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Distinct "YYYY-MM" keys across the records, most recent first
pub fn available_months(records: &[ExpenseRecord]) -> Vec<String> {
    let mut months: Vec<String> = records
        .iter()
        .map(|r| r.date.format("%Y-%m").to_string())
        .collect();
    months.sort();
    months.dedup();
    months.reverse();
    months
}

/// Default month selection: the current calendar month if present,
/// otherwise the most recent available month
pub fn default_month(months: &[String]) -> Option<String> {
    let current = Utc::now().date_naive().format("%Y-%m").to_string();
    if months.iter().any(|m| *m == current) {
        return Some(current);
    }
    months.first().cloned()
}

/// Reduce one user's records to the selected month's summary
///
/// A user with no records at all gets a zero-expense summary with
/// `income_total = savings = salary` and `savings_percent = 0`. A month
/// with no records (but a non-empty history) reports through the normal
/// formula, so a salaried empty month shows 100% savings. Zero income
/// always reports zero percent rather than dividing by zero.
pub fn summarize(records: &[ExpenseRecord], salary: f64, month_key: &str) -> MonthlySummary {
    if records.is_empty() {
        return MonthlySummary {
            month: month_key.to_string(),
            expense_total: 0.0,
            income_total: salary,
            savings: salary,
            savings_percent: 0.0,
            month_records: Vec::new(),
        };
    }

    let month_records: Vec<ExpenseRecord> = match parse_month_key(month_key) {
        Some((year, month)) => records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let expense_total: f64 = month_records.iter().map(|r| r.amount).sum();
    let other_income: f64 = month_records.iter().map(|r| r.other_income).sum();
    let income_total = salary + other_income;
    let savings = income_total - expense_total;
    let savings_percent = if income_total != 0.0 {
        savings / income_total * 100.0
    } else {
        0.0
    };

    MonthlySummary {
        month: month_key.to_string(),
        expense_total,
        income_total,
        savings,
        savings_percent,
        month_records,
    }
}
