//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categories` - Taxonomy commands (list, bind)
//! - `dashboard` - Month list and monthly dashboard commands
//! - `expenses` - Expense commands (add, list, delete)
//! - `reports` - Report export command
//! - `serve` - Web server command
//! - `users` - User registration command

pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod reports;
pub mod serve;
pub mod users;

// Re-export command functions for main.rs
pub use categories::*;
pub use dashboard::*;
pub use expenses::*;
pub use reports::*;
pub use serve::*;
pub use users::*;

use std::path::Path;

use anyhow::{Context, Result};
use kharcha_core::db::Database;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a user: kharcha signup --email you@example.com ...");
    println!("  2. Record an expense: kharcha add --email you@example.com ...");
    println!("  3. Start web UI: kharcha serve");

    Ok(())
}
