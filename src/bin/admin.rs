//! CLI administration tool for tinylink.
//!
//! Provides commands for inspecting and pruning links, viewing statistics,
//! and performing database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # List links (newest first)
//! cargo run --bin admin -- links list --limit 20
//!
//! # Show one link
//! cargo run --bin admin -- links show promo_2025
//!
//! # Delete a link
//! cargo run --bin admin -- links delete promo_2025
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or the `DB_*` components, plus the
//! pool settings.

use tinylink::config;
use tinylink::domain::entities::Link;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Inspect and manage links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats {
        /// Number of most-clicked links to show
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Maximum number of links to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

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

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = Arc::new(server::connect_pool(&config).await?);
    let repo = PgLinkRepository::with_timeout(pool.clone(), config.store_timeout());

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &repo).await?,
        Commands::Stats { top } => handle_stats(&repo, top).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &repo).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, repo: &PgLinkRepository) -> Result<()> {
    match action {
        LinksAction::List { limit } => list_links(repo, limit).await,
        LinksAction::Show { code } => show_link(repo, &code).await,
        LinksAction::Delete { code, yes } => delete_link(repo, &code, yes).await,
    }
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code         Clicks   Last click         Target
///   ──────────────────────────────────────────────────────────────
///   promo_2025   12       2025-01-15 10:30   https://example.com/
/// ```
async fn list_links(repo: &PgLinkRepository, limit: usize) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last click".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in links.iter().take(limit) {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            link.code.cyan(),
            link.click_count.to_string().bright_green(),
            format_last_click(link).bright_black(),
            link.target_url
        );
    }

    println!();
    if links.len() > limit {
        println!(
            "  Showing {} of {}",
            limit.to_string().bright_white().bold(),
            links.len().to_string().bright_white().bold()
        );
    } else {
        println!("  Total: {}", links.len().to_string().bright_white().bold());
    }
    println!();

    Ok(())
}

/// Prints every field of one link.
async fn show_link(repo: &PgLinkRepository, code: &str) -> Result<()> {
    let link = repo
        .find(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  ID:         {}", link.id.to_string().bright_black());
    println!("  Code:       {}", link.code.cyan());
    println!("  Target:     {}", link.target_url);
    println!(
        "  Clicks:     {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!("  Last click: {}", format_last_click(&link));
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &PgLinkRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = repo
        .find(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!("  Clicks: {}", link.click_count);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays totals and the most-clicked links.
async fn handle_stats(repo: &PgLinkRepository, top: usize) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mut links = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    let total_clicks: i64 = links.iter().map(|l| l.click_count).sum();
    let never_clicked = links.iter().filter(|l| !l.has_been_clicked()).count();

    println!(
        "  Links:         {}",
        links.len().to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Never clicked: {}",
        never_clicked.to_string().bright_green().bold()
    );
    println!();

    if top > 0 && !links.is_empty() {
        links.sort_by(|a, b| b.click_count.cmp(&a.click_count));

        println!("{}", "  Top links:".bright_white().bold());
        for link in links.iter().take(top) {
            println!(
                "    {:<12} {:>8}  {}",
                link.code.cyan(),
                link.click_count.to_string().bright_green(),
                link.target_url.bright_black()
            );
        }
        println!();
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, repo: &PgLinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            server::migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn format_last_click(link: &Link) -> String {
    link.last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}
