//! Kharcha CLI - Personal expense and budget tracker
//!
//! Usage:
//!   kharcha init                          Initialize database
//!   kharcha signup --email a@b.c ...      Register a user
//!   kharcha add --email a@b.c ...         Record an expense
//!   kharcha dashboard --email a@b.c       Monthly summary, budget, insights
//!   kharcha serve --port 3000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Signup {
            name,
            email,
            password,
            salary,
            dob,
            phone,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_signup(
                &db,
                &name,
                &email,
                &password,
                salary,
                dob.as_deref(),
                phone.as_deref(),
            )
        }
        Commands::Add {
            email,
            date,
            amount,
            category,
            subcategory,
            bucket,
            name,
            payment_mode,
            spent_by,
            notes,
            other_income,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(
                &db,
                &email,
                date.as_deref(),
                amount,
                &category,
                &subcategory,
                bucket.as_deref(),
                name.as_deref(),
                payment_mode.as_deref(),
                spent_by.as_deref(),
                notes.as_deref(),
                other_income,
            )
        }
        Commands::List {
            email,
            month,
            limit,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_list(&db, &email, month.as_deref(), limit)
        }
        Commands::Delete { email, id } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_delete(&db, &email, id)
        }
        Commands::Months { email } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_months(&db, &email)
        }
        Commands::Dashboard { email, month } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_dashboard(&db, &email, month.as_deref())
        }
        Commands::Report {
            email,
            month,
            format,
            output,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_report(&db, &email, &month, &format, output.as_deref())
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Bind {
                    category,
                    subcategory,
                    bucket,
                }) => commands::cmd_categories_bind(&db, &category, &subcategory, bucket.as_deref()),
            }
        }
    }
}
