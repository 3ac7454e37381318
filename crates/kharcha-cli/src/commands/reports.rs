//! Report export command

use std::path::Path;

use anyhow::{Context, Result};

use kharcha_core::analysis::{BudgetMap, CategoryMap};
use kharcha_core::db::Database;
use kharcha_core::report::{monthly_report, ReportFormat};

pub fn cmd_report(
    db: &Database,
    email: &str,
    month: &str,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ReportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let report = monthly_report(
        db,
        &BudgetMap::default(),
        &CategoryMap::default(),
        email,
        month,
        format,
    )?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| report.filename.clone().into());

    std::fs::write(&path, &report.bytes)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    println!("✅ Report written to {}", path.display());
    println!("   Format: {} ({} bytes)", format, report.bytes.len());

    Ok(())
}
