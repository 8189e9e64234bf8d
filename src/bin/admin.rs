//! CLI administration tool for shortlink.
//!
//! Inspects stored short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- list
//!
//! # Most clicked links
//! cargo run --bin admin -- list --top --limit 10
//!
//! # Show a single link
//! cargo run --bin admin -- show v7TN5e
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `DB_*` pool settings, as for the server

use shortlink::application::services::{LinkService, ListingService};
use shortlink::config;
use shortlink::domain::entities::ShortLink;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored links
    List {
        /// Only the most clicked links
        #[arg(long)]
        top: bool,

        /// Number of links shown with --top (defaults to TOP_LINKS_LIMIT)
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show a single link by its shortcode
    Show {
        hash: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::List { top, limit } => {
            let limit = limit.unwrap_or(config.top_links_limit);
            list_links(&pool, top, limit).await?
        }
        Commands::Show { hash } => show_link(&pool, &config.base_url, &hash).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn repository(pool: &PgPool) -> Arc<PgLinkRepository> {
    Arc::new(PgLinkRepository::new(Arc::new(pool.clone())))
}

/// Prints links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Hash    Clicks  Expires              Target
///   ──────────────────────────────────────────────────────────────────
///   v7TN5e  12      2025-01-15 10:30     http://example.com/page
/// ```
async fn list_links(pool: &PgPool, top: bool, limit: i64) -> Result<()> {
    let service = ListingService::with_top_limit(repository(pool), limit);

    let links = service
        .list(top)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if top {
        println!("{}", "🏆 Most clicked links".bright_blue().bold());
    } else {
        println!("{}", "📋 Links".bright_blue().bold());
    }
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<7} {:<7} {:<20} {}",
        "Hash".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<7} {:<7} {:<20} {}",
            link.hash.cyan(),
            link.click_count.to_string().bright_green(),
            expiry_label(link),
            link.target
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(pool: &PgPool, base_url: &str, hash: &str) -> Result<()> {
    let service = LinkService::new(repository(pool));

    let link = service
        .get_link(hash)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", hash, e))?;

    println!("{}", "🔗 Short link".bright_blue().bold());
    println!();
    println!("  Hash:      {}", link.hash.cyan());
    println!(
        "  Short URL: {}",
        service.get_short_url(base_url, &link.hash).bright_white()
    );
    println!("  Target:    {}", link.target);
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!("  Expires:   {}", expiry_label(&link));
    println!(
        "  Clicks:    {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

fn expiry_label(link: &ShortLink) -> ColoredString {
    let formatted = link.expires_at.format("%Y-%m-%d %H:%M").to_string();
    if link.is_expired() {
        format!("{} (expired)", formatted).red()
    } else {
        formatted.normal()
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;
            let clicks: i64 =
                sqlx::query_scalar("SELECT COALESCE(SUM(click_counts), 0)::BIGINT FROM urls")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
