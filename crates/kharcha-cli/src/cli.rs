//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kharcha - Track expenses against a monthly budget
#[derive(Parser)]
#[command(name = "kharcha")]
#[command(about = "Self-hosted personal expense and budget tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "kharcha.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set KHARCHA_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires a session token from /api/auth/login.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Register a new user
    Signup {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address (the account identifier)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Monthly salary
        #[arg(short, long)]
        salary: f64,

        /// Date of birth (used for password reset verification)
        #[arg(long)]
        dob: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Record an expense
    Add {
        /// Owner's email
        #[arg(short, long)]
        email: String,

        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Category (free-form; unknown categories fall into the default bucket)
        #[arg(short, long)]
        category: String,

        /// Subcategory
        #[arg(long, default_value = "")]
        subcategory: String,

        /// Budget bucket for a new category/subcategory pair
        /// (persisted for future entries)
        #[arg(short, long)]
        bucket: Option<String>,

        /// Short label for the entry
        #[arg(short, long)]
        name: Option<String>,

        /// Payment mode (e.g., UPI, Cash, Card)
        #[arg(long)]
        payment_mode: Option<String>,

        /// Who spent it
        #[arg(long)]
        spent_by: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Incidental income recorded alongside this entry
        #[arg(long, default_value = "0")]
        other_income: f64,
    },

    /// List a user's expenses
    List {
        /// Owner's email
        #[arg(short, long)]
        email: String,

        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an expense by id
    Delete {
        /// Owner's email
        #[arg(short, long)]
        email: String,

        /// Expense id
        id: i64,
    },

    /// Show the months that have expense data
    Months {
        /// Owner's email
        #[arg(short, long)]
        email: String,
    },

    /// Show the monthly dashboard (summary, budget table, insights)
    Dashboard {
        /// Owner's email
        #[arg(short, long)]
        email: String,

        /// Month to show (YYYY-MM, defaults to the current or most recent month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export a monthly report
    Report {
        /// Owner's email
        #[arg(short, long)]
        email: String,

        /// Month to export (YYYY-MM)
        #[arg(short, long)]
        month: String,

        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to the report's own filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or extend the category taxonomy
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Bind a category/subcategory pair to a budget bucket
    /// (affects future entries only)
    Bind {
        /// Category name
        #[arg(short, long)]
        category: String,

        /// Subcategory name
        #[arg(long, default_value = "")]
        subcategory: String,

        /// Target bucket (defaults to Lifestyle + Personal)
        #[arg(short, long)]
        bucket: Option<String>,
    },
}
