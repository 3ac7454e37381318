//! Persisted category → bucket bindings
//!
//! When a user introduces a category/subcategory pair the static map
//! doesn't know, the chosen bucket is stored here and consulted for
//! future entries. Existing expense rows keep the bucket frozen at
//! their entry time; re-binding never rewrites history.

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::analysis::CategoryMap;
use crate::error::Result;
use crate::models::CategoryBinding;

impl Database {
    /// Bind a category/subcategory pair to a bucket (upsert)
    pub fn bind_category(&self, category: &str, subcategory: &str, bucket: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO category_bindings (category, subcategory, bucket)
            VALUES (?, ?, ?)
            ON CONFLICT(category, subcategory) DO UPDATE SET bucket = excluded.bucket
            "#,
            params![category, subcategory, bucket],
        )?;
        Ok(())
    }

    /// Look up a stored binding for a category/subcategory pair
    pub fn lookup_binding(&self, category: &str, subcategory: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let bucket = conn
            .query_row(
                "SELECT bucket FROM category_bindings WHERE category = ? AND subcategory = ?",
                params![category, subcategory],
                |row| row.get(0),
            )
            .optional()?;
        Ok(bucket)
    }

    pub fn list_bindings(&self) -> Result<Vec<CategoryBinding>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, category, subcategory, bucket, created_at \
             FROM category_bindings ORDER BY category, subcategory",
        )?;

        let bindings = stmt
            .query_map([], |row| {
                Ok(CategoryBinding {
                    id: row.get(0)?,
                    category: row.get(1)?,
                    subcategory: row.get(2)?,
                    bucket: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(bindings)
    }

    /// Resolve the bucket to freeze onto a new expense entry
    ///
    /// Resolution order: an explicit bucket from the caller (stored as a
    /// binding for future lookups), then a stored binding for the pair,
    /// then the static category map (which also persists a binding for
    /// pairs it has never seen, defaulting the bucket).
    pub fn resolve_entry_bucket(
        &self,
        categories: &CategoryMap,
        category: &str,
        subcategory: &str,
        explicit: Option<&str>,
    ) -> Result<String> {
        if let Some(bucket) = explicit {
            self.bind_category(category, subcategory, bucket)?;
            return Ok(bucket.to_string());
        }

        if let Some(bucket) = self.lookup_binding(category, subcategory)? {
            return Ok(bucket);
        }

        let bucket = categories.resolve(category).to_string();

        // A pair neither the static map nor the bindings know gets
        // persisted with the default, so future lookups are stable.
        let known_category = categories.iter().any(|(cat, _)| cat == category);
        if !known_category {
            self.bind_category(category, subcategory, &bucket)?;
        }

        Ok(bucket)
    }
}
