//! Bucket-level budget analysis
//!
//! Compares each bucket's actual spend against its allotted share of the
//! month's income. Spend attribution uses the bucket frozen on each
//! record at entry time, never a live re-resolution of its category.

use crate::models::{BudgetRow, BudgetStatus, ExpenseRecord};

use super::categories::CategoryMap;

/// Ordered bucket → percent-of-income mapping
///
/// Percentages are consumed verbatim: they need not sum to 100, and
/// unallocated or overlapping shares are allowed. Iteration order is
/// definition order and fixes the order of the returned budget rows.
#[derive(Debug, Clone)]
pub struct BudgetMap {
    entries: Vec<(String, f64)>,
}

impl BudgetMap {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn percent(&self, bucket: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(b, _)| b == bucket)
            .map(|(_, pct)| *pct)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(b, pct)| (b.as_str(), *pct))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BudgetMap {
    fn default() -> Self {
        let entries = [
            ("Rent + Utilities", 25.0),
            ("Household + Groceries", 15.0),
            ("Insurance + Health", 10.0),
            ("EMI + Debt", 20.0),
            ("Savings + Investment", 15.0),
            ("Lifestyle + Personal", 10.0),
            ("Emergency Fund", 5.0),
        ]
        .into_iter()
        .map(|(bucket, pct)| (bucket.to_string(), pct))
        .collect();

        Self { entries }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify each budget bucket for the month as within-limit or overspent
///
/// Returns one row per bucket in `budget_map` order, or an empty
/// sequence when `month_records` is empty (whatever the map contains).
/// Overspent means `spent > limit` strictly; equality is OK.
pub fn analyze_budget(
    month_records: &[ExpenseRecord],
    budget_map: &BudgetMap,
    categories: &CategoryMap,
    income_total: f64,
) -> Vec<BudgetRow> {
    if month_records.is_empty() {
        return Vec::new();
    }

    budget_map
        .iter()
        .map(|(bucket, percent)| {
            let limit = round2(income_total * percent / 100.0);

            let spent: f64 = month_records
                .iter()
                .filter(|r| r.bucket == bucket)
                .map(|r| r.amount)
                .sum();
            let spent = round2(spent);

            let status = if spent > limit {
                BudgetStatus::Overspent
            } else {
                BudgetStatus::Ok
            };

            let cats = categories.categories_for(bucket);
            let categories = if cats.is_empty() {
                "-".to_string()
            } else {
                cats.join(", ")
            };

            BudgetRow {
                bucket: bucket.to_string(),
                categories,
                limit,
                spent,
                status,
            }
        })
        .collect()
}
