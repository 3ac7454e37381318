//! Category taxonomy commands

use anyhow::{bail, Result};

use kharcha_core::analysis::{CategoryMap, DEFAULT_BUCKET};
use kharcha_core::db::Database;

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = CategoryMap::default();
    let bindings = db.list_bindings()?;

    println!();
    println!("🗂  Category → bucket taxonomy");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Defaults:");
    for (category, bucket) in categories.iter() {
        println!("   {:15} → {}", category, bucket);
    }

    if !bindings.is_empty() {
        println!();
        println!("   User bindings:");
        for binding in &bindings {
            if binding.subcategory.is_empty() {
                println!("   {:15} → {}", binding.category, binding.bucket);
            } else {
                println!(
                    "   {:15} → {} ({})",
                    binding.category, binding.bucket, binding.subcategory
                );
            }
        }
    }

    println!();
    println!("   Unknown categories fall into: {}", DEFAULT_BUCKET);

    Ok(())
}

pub fn cmd_categories_bind(
    db: &Database,
    category: &str,
    subcategory: &str,
    bucket: Option<&str>,
) -> Result<()> {
    if category.trim().is_empty() {
        bail!("Category must not be empty");
    }

    let bucket = bucket.unwrap_or(DEFAULT_BUCKET);
    db.bind_category(category, subcategory, bucket)?;

    if subcategory.is_empty() {
        println!("✅ Bound {} → {}", category, bucket);
    } else {
        println!("✅ Bound {}/{} → {}", category, subcategory, bucket);
    }
    println!("   Existing expenses keep their recorded bucket.");

    Ok(())
}
