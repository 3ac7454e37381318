//! Expense command implementations

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use kharcha_core::analysis::CategoryMap;
use kharcha_core::db::Database;
use kharcha_core::models::NewExpense;

use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db: &Database,
    email: &str,
    date: Option<&str>,
    amount: f64,
    category: &str,
    subcategory: &str,
    bucket: Option<&str>,
    name: Option<&str>,
    payment_mode: Option<&str>,
    spent_by: Option<&str>,
    notes: Option<&str>,
    other_income: f64,
) -> Result<()> {
    if amount < 0.0 {
        bail!("Amount must be non-negative");
    }
    if other_income < 0.0 {
        bail!("Other income must be non-negative");
    }
    if db.get_user_by_email(email)?.is_none() {
        bail!("Unknown user: {} (run `kharcha signup` first)", email);
    }

    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };

    let categories = CategoryMap::default();
    let bucket = db.resolve_entry_bucket(&categories, category, subcategory, bucket)?;

    let expense = NewExpense {
        name: name.map(str::to_string),
        date,
        amount,
        category: category.to_string(),
        subcategory: if subcategory.is_empty() {
            None
        } else {
            Some(subcategory.to_string())
        },
        bucket: bucket.clone(),
        spent_by: spent_by.map(str::to_string),
        payment_mode: payment_mode.map(str::to_string),
        notes: notes.map(str::to_string),
        other_income,
    };

    let id = db.add_expense(email, &expense)?;

    println!("✅ Recorded expense #{}", id);
    println!("   {} │ {:.2} │ {} → {}", date, amount, category, bucket);

    Ok(())
}

pub fn cmd_list(db: &Database, email: &str, month: Option<&str>, limit: usize) -> Result<()> {
    let records = db.list_expenses(email)?;

    let records: Vec<_> = match month {
        Some(m) => records
            .iter()
            .filter(|r| r.date.format("%Y-%m").to_string() == m)
            .cloned()
            .collect(),
        None => records,
    };

    println!();
    println!("💸 Expenses for {}", email);
    if let Some(m) = month {
        println!("   Month: {}", m);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if records.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:10} │ {:>10} │ {:15} │ {:22}",
        "ID", "Date", "Amount", "Category", "Bucket"
    );
    println!("   ──────┼────────────┼────────────┼─────────────────┼───────────────────────");

    for record in records.iter().take(limit) {
        println!(
            "   {:>5} │ {:10} │ {:>10.2} │ {:15} │ {:22}",
            record.id,
            record.date.to_string(),
            record.amount,
            truncate(&record.category, 15),
            truncate(&record.bucket, 22),
        );
    }

    if records.len() > limit {
        println!("   ... and {} more", records.len() - limit);
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, email: &str, id: i64) -> Result<()> {
    if db.delete_expense(id, email)? {
        println!("✅ Deleted expense #{}", id);
    } else {
        bail!("Expense #{} not found for {}", id, email);
    }
    Ok(())
}
