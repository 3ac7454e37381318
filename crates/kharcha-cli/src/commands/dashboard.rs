//! Dashboard command implementations

use anyhow::{bail, Result};

use kharcha_core::analysis::{
    analyze_budget, available_months, default_month, generate_insights, parse_month_key, summarize,
    BudgetMap, CategoryMap,
};
use kharcha_core::db::Database;

use super::truncate;

pub fn cmd_months(db: &Database, email: &str) -> Result<()> {
    let records = db.list_expenses(email)?;
    let months = available_months(&records);

    println!();
    println!("📅 Months with expense data for {}", email);
    println!("   ─────────────────────────────────────────────────────────────");

    if months.is_empty() {
        println!("   No expenses yet.");
        return Ok(());
    }

    let default = default_month(&months);
    for month in &months {
        if Some(month) == default.as_ref() {
            println!("   {} (default)", month);
        } else {
            println!("   {}", month);
        }
    }

    Ok(())
}

pub fn cmd_dashboard(db: &Database, email: &str, month: Option<&str>) -> Result<()> {
    let Some(user) = db.get_user_by_email(email)? else {
        bail!("Unknown user: {}", email);
    };

    if let Some(m) = month {
        if parse_month_key(m).is_none() {
            bail!("Invalid month: {} (use YYYY-MM)", m);
        }
    }

    let records = db.list_expenses(email)?;
    let months = available_months(&records);

    let month = match month {
        Some(m) => m.to_string(),
        None => match default_month(&months) {
            Some(m) => m,
            None => {
                println!();
                println!("📭 No expenses yet. Start adding some!");
                return Ok(());
            }
        },
    };

    let budget_map = BudgetMap::default();
    let categories = CategoryMap::default();

    let summary = summarize(&records, user.salary, &month);
    let rows = analyze_budget(
        &summary.month_records,
        &budget_map,
        &categories,
        summary.income_total,
    );
    let insights = generate_insights(&rows, summary.savings_percent);

    println!();
    println!("📊 Dashboard for {} - {}", email, month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Expense:   {:>12.2}", summary.expense_total);
    println!("   Income:    {:>12.2}", summary.income_total);
    println!("   Savings:   {:>12.2}", summary.savings);
    println!("   Savings %: {:>11.1}%", summary.savings_percent);

    if !rows.is_empty() {
        println!();
        println!("📌 Budget vs Actual");
        println!(
            "   {:22} │ {:>10} │ {:>10} │ {:9}",
            "Bucket", "Limit", "Spent", "Status"
        );
        println!("   ───────────────────────┼────────────┼────────────┼──────────");
        for row in &rows {
            println!(
                "   {:22} │ {:>10.2} │ {:>10.2} │ {:9}",
                truncate(&row.bucket, 22),
                row.limit,
                row.spent,
                row.status.label(),
            );
        }
    }

    println!();
    println!("🤖 Insights");
    for insight in &insights {
        println!("   • {}", insight);
    }

    Ok(())
}
