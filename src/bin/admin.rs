//! CLI administration tool for short-links.
//!
//! Provides commands for inspecting and deleting links, viewing statistics,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links (newest first)
//! cargo run --bin admin -- links list --page 1 --page-size 20
//!
//! # Show one link
//! cargo run --bin admin -- links show k3x9qa
//!
//! # Delete by id or by code
//! cargo run --bin admin -- links delete --id 42
//! cargo run --bin admin -- links delete --code k3x9qa -y
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string, or
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`: its components
//!
//! Resolved the same way as for the server (see [`Config::load_database_url`]).

use short_links::application::services::LinkService;
use short_links::config::Config;
use short_links::domain::entities::Link;
use short_links::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-links.
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
    /// Inspect and delete links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 20)]
        page_size: i64,
    },

    /// Show a single link by short code
    Show {
        code: String,
    },

    /// Delete a link by id or by short code
    #[command(group(ArgGroup::new("target").required(true).args(["id", "code"])))]
    Delete {
        /// Numeric link id
        #[arg(long)]
        id: Option<i64>,

        /// Short code
        #[arg(long)]
        code: Option<String>,

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

    let database_url =
        Config::load_database_url().context("Failed to load database configuration")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    pool.close().await;

    Ok(())
}

type Service = LinkService<PgLinkRepository>;

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &Service) -> Result<()> {
    match action {
        LinkAction::List { page, page_size } => list_links(service, page, page_size).await,
        LinkAction::Show { code } => show_link(service, &code).await,
        LinkAction::Delete { id, code, yes } => delete_link(service, id, code, yes).await,
    }
}

async fn list_links(service: &Service, page: i64, page_size: i64) -> Result<()> {
    if page < 1 || !(1..=1000).contains(&page_size) {
        anyhow::bail!("page must be >= 1 and page-size between 1 and 1000");
    }

    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let (links, total) = service
        .list_links(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<6} {:<8} {:>8} {:<17} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for link in &links {
        println!(
            "  {:<6} {:<8} {:>8} {:<17} {}",
            link.id.to_string().bright_black(),
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Page {} · showing {} of {}",
        page,
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_link(service: &Service, code: &str) -> Result<()> {
    let link = service
        .get_link_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);
    Ok(())
}

/// Which key a delete command targets.
enum DeleteTarget {
    Id(i64),
    Code(String),
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &Service,
    id: Option<i64>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let target = match (id, code) {
        (Some(id), _) => DeleteTarget::Id(id),
        (None, Some(code)) => DeleteTarget::Code(code),
        (None, None) => anyhow::bail!("either --id or --code is required"),
    };

    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = match &target {
        DeleteTarget::Id(id) => service.get_link(*id).await,
        DeleteTarget::Code(code) => service.get_link_by_code(code).await,
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link permanently?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match &target {
        DeleteTarget::Id(id) => service.delete_link(*id).await,
        DeleteTarget::Code(code) => service.delete_link_by_code(code).await,
    }
    .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link) {
    println!("  ID:      {}", link.id.to_string().bright_black());
    println!("  Code:    {}", link.code.cyan());
    println!("  Caption: {}", link.caption);
    println!("  Target:  {}", link.target_url);
    println!("  Clicks:  {}", link.clicks.to_string().bright_green());
    println!(
        "  Created: {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Displays link and click totals.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links, clicks) = service
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  Links:  {}", links.to_string().bright_green().bold());
    println!("  Clicks: {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &Service) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
