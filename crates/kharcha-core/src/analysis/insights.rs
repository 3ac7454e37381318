//! Insight generation
//!
//! Derives a short, deterministic list of observations from the budget
//! rows and the month's savings rate. Order: one message per overspent
//! bucket (in row order), then the savings-rate message, then a generic
//! fallback when nothing else fired.

use crate::models::{BudgetRow, BudgetStatus};

/// Generate insight messages for a month's budget analysis
///
/// A savings rate in `[10, 20)` produces neither the warning nor the
/// praise message; only the fallback can fire then. That band is
/// intentional and preserved from the original rules.
pub fn generate_insights(budget_rows: &[BudgetRow], savings_percent: f64) -> Vec<String> {
    if budget_rows.is_empty() {
        return vec!["No data for insights".to_string()];
    }

    let mut insights = Vec::new();

    for row in budget_rows {
        if row.status == BudgetStatus::Overspent {
            insights.push(format!("{} exceeded its budget limit", row.bucket));
        }
    }

    if savings_percent < 10.0 {
        insights.push("Savings below 10% of income".to_string());
    } else if savings_percent >= 20.0 {
        insights.push("Good savings habit".to_string());
    }

    if insights.is_empty() {
        insights.push("Good financial health".to_string());
    }

    insights
}
