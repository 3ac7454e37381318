//! Category → bucket resolution
//!
//! Expense categories are free-form; budgets are tracked against a small
//! fixed set of buckets. The `CategoryMap` holds the forward mapping and
//! answers lookups with a default bucket for anything unknown. It is a
//! plain configuration value passed in by the caller, not global state.

/// Bucket assigned to categories with no mapping
pub const DEFAULT_BUCKET: &str = "Lifestyle + Personal";

/// Ordered category → bucket mapping
///
/// Iteration order is definition order; the bucket → categories
/// inversion preserves it for display.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: Vec<(String, String)>,
}

impl CategoryMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Resolve a category to its bucket; unknown categories fall back to
    /// [`DEFAULT_BUCKET`]
    pub fn resolve(&self, category: &str) -> &str {
        self.entries
            .iter()
            .find(|(cat, _)| cat == category)
            .map(|(_, bucket)| bucket.as_str())
            .unwrap_or(DEFAULT_BUCKET)
    }

    /// Invert the mapping: bucket → categories, in forward-map order
    ///
    /// Used only to annotate budget rows with the categories that roll
    /// up into each bucket.
    pub fn buckets_to_categories(&self) -> Vec<(String, Vec<String>)> {
        let mut inverted: Vec<(String, Vec<String>)> = Vec::new();
        for (category, bucket) in &self.entries {
            match inverted.iter_mut().find(|(b, _)| b == bucket) {
                Some((_, cats)) => cats.push(category.clone()),
                None => inverted.push((bucket.clone(), vec![category.clone()])),
            }
        }
        inverted
    }

    /// Categories that resolve to the given bucket, in forward-map order
    pub fn categories_for(&self, bucket: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, b)| b == bucket)
            .map(|(cat, _)| cat.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(cat, bucket)| (cat.as_str(), bucket.as_str()))
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        let entries = [
            ("Food", "Household + Groceries"),
            ("Bills", "Rent + Utilities"),
            ("EMI", "EMI + Debt"),
            ("Health", "Insurance + Health"),
            ("Savings", "Savings + Investment"),
            ("Personal", "Lifestyle + Personal"),
            ("Family", "Lifestyle + Personal"),
            ("Transport", "Lifestyle + Personal"),
            ("Miscellaneous", "Lifestyle + Personal"),
        ]
        .into_iter()
        .map(|(cat, bucket)| (cat.to_string(), bucket.to_string()))
        .collect();

        Self { entries }
    }
}
