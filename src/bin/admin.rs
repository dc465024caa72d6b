//! CLI administration tool for the link registry.
//!
//! Manages links directly in the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the first ten links
//! cargo run --bin admin -- links list
//!
//! # List a window of links
//! cargo run --bin admin -- links list --start 10 --end 19
//!
//! # Create a link (prompts for missing values)
//! cargo run --bin admin -- links create --url https://example.com --name exmpl
//!
//! # Delete a link
//! cargo run --bin admin -- links delete 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same database variables as the server (`DATABASE_URL` or `DB_*`),
//! plus `BASE_URL` and `REDIRECT_PREFIX` to print short URLs.

use link_registry::config::{Config, StorageBackend};
use link_registry::domain::pagination::ListWindow;
use link_registry::infrastructure::persistence::PgLinkRepository;
use link_registry::prelude::{LinkService, PublicUrls};
use link_registry::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the link registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links ordered by id
    List {
        /// First row of the window (0-based, inclusive)
        #[arg(long, default_value_t = 0)]
        start: i64,

        /// Last row of the window (inclusive)
        #[arg(long, default_value_t = 9)]
        end: i64,
    },

    /// Create a new link
    Create {
        /// Destination URL
        #[arg(short, long)]
        url: Option<String>,

        /// Short name to redirect from
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Permanently delete a link
    Delete {
        /// Link id
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env_with_backend(StorageBackend::Postgres)?;
    config.validate()?;

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repository);
    let urls = PublicUrls::new(&config.base_url, config.redirect_prefix.as_deref());

    match action {
        LinkAction::List { start, end } => list_links(&service, &urls, start, end).await?,
        LinkAction::Create { url, name } => create_link(&service, &urls, url, name).await?,
        LinkAction::Delete { id, yes } => delete_link(&service, id, yes).await?,
    }

    Ok(())
}

/// Prints one window of links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID    Short name         Created           Original URL
///   ──────────────────────────────────────────────────────────────────────
///   1     exmpl              2025-01-15 10:30  https://example.com
///
///   Showing 0-0 of 1
/// ```
async fn list_links(service: &LinkService, urls: &PublicUrls, start: i64, end: i64) -> Result<()> {
    let window = ListWindow::new(start, end)
        .context("Invalid window: start must be >= 0 and end >= start")?;

    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let page = service
        .list_links(window)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if page.links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<18} {:<17} {}",
        "ID".bright_white().bold(),
        "Short name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &page.links {
        println!(
            "  {:<5} {:<18} {:<17} {}",
            link.id.to_string().bright_black(),
            link.short_name.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    let range = page.window.content_range(page.links.len(), page.total);
    println!();
    println!(
        "  Showing {}-{} of {}",
        range.first,
        range.last,
        range.total.to_string().bright_white().bold()
    );
    if let Some(first) = page.links.first() {
        println!("  e.g. {}", urls.short_url(first).bright_black());
    }
    println!();

    Ok(())
}

/// Creates a link, prompting for missing values.
async fn create_link(
    service: &LinkService,
    urls: &PublicUrls,
    url: Option<String>,
    name: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let original_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Original URL")
            .interact_text()?,
    };

    let short_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Short name").interact_text()?,
    };

    let link = service
        .create_link(original_url, short_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Short URL: {}", urls.short_url(&link).bright_yellow());
    println!("  Target:    {}", link.original_url.cyan());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Short name: {}", link.short_name.cyan());
    println!("  Target:     {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
    }

    Ok(())
}
