//! Expense record operations
//!
//! `list_expenses` is the store boundary for the analysis engine: rows
//! whose date does not parse as a calendar date are excluded here, so
//! downstream aggregation can assume every record is valid-dated.

use chrono::NaiveDate;
use rusqlite::{params, Row};
use tracing::warn;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{ExpenseRecord, NewExpense};

const EXPENSE_COLUMNS: &str = "id, user_email, name, date, amount, category, subcategory, bucket, \
     spent_by, payment_mode, notes, other_income, created_at";

/// Map a row, returning None when the stored date is unparseable
fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Option<ExpenseRecord>> {
    let date_str: String = row.get(3)?;
    let date = match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return Ok(None),
    };

    Ok(Some(ExpenseRecord {
        id: row.get(0)?,
        user_email: row.get(1)?,
        name: row.get(2)?,
        date,
        amount: row.get(4)?,
        category: row.get(5)?,
        subcategory: row.get(6)?,
        bucket: row.get(7)?,
        spent_by: row.get(8)?,
        payment_mode: row.get(9)?,
        notes: row.get(10)?,
        other_income: row.get(11)?,
        created_at: parse_datetime(&row.get::<_, String>(12)?),
    }))
}

impl Database {
    /// Record an expense for a user
    ///
    /// The caller supplies the already-resolved bucket; it is stored as a
    /// frozen snapshot and never recomputed.
    pub fn add_expense(&self, user_email: &str, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (user_email, name, date, amount, category, subcategory, bucket,
                                  spent_by, payment_mode, notes, other_income)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_email,
                expense.name,
                expense.date.to_string(),
                expense.amount,
                expense.category,
                expense.subcategory,
                expense.bucket,
                expense.spent_by,
                expense.payment_mode,
                expense.notes,
                expense.other_income,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's expense records, newest first
    ///
    /// Rows with unparseable dates are excluded; downstream analysis
    /// assumes valid dates.
    pub fn list_expenses(&self, user_email: &str) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE user_email = ? ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_email], expense_from_row)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in rows {
            match row? {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(
                user = user_email,
                skipped, "Excluded expense rows with invalid dates"
            );
        }

        Ok(records)
    }

    /// Delete one of the user's expenses; false if no matching row
    pub fn delete_expense(&self, id: i64, user_email: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM expenses WHERE id = ? AND user_email = ?",
            params![id, user_email],
        )?;
        Ok(deleted > 0)
    }

    pub fn expense_count(&self, user_email: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE user_email = ?",
            params![user_email],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
