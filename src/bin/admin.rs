//! CLI administration tool for shortlink.
//!
//! Works directly against the Redis link store, without going through the
//! HTTP API (and therefore without rate limiting).
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for it when omitted)
//! cargo run --bin admin -- shorten example.com/some/page
//!
//! # Inspect a short link without counting a hit
//! cargo run --bin admin -- show aZ09bY18
//!
//! # Check the store connection
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB` (required)
//! - `BASE_URL`: prefix for printed short URLs (default: `http://localhost:8080`)

use shortlink::application::services::LinkService;
use shortlink::config::{self, Config, mask_connection_string};
use shortlink::infrastructure::qr::QrCodeGenerator;
use shortlink::infrastructure::store::RedisLinkStore;
use shortlink::prelude::LinkStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
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
    /// Create a short link
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Also print the QR code as base64 PNG
        #[arg(long)]
        qr: bool,
    },

    /// Show a short link without counting a hit
    Show {
        /// Short code, e.g. aZ09bY18
        code: String,
    },

    /// Check the store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let redis_url = config
        .redis_url
        .clone()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    match cli.command {
        Commands::Shorten { url, qr } => {
            let service = connect_service(&redis_url, &config).await?;
            shorten(&service, &config, url, qr).await?
        }
        Commands::Show { code } => {
            let service = connect_service(&redis_url, &config).await?;
            show(&service, &code).await?
        }
        Commands::Check => check_store(&redis_url, &config).await?,
    }

    Ok(())
}

async fn connect_service(redis_url: &str, config: &Config) -> Result<LinkService> {
    let store = RedisLinkStore::connect(redis_url, config.redis_connect_retries)
        .await
        .context("Failed to connect to Redis")?;

    Ok(LinkService::new(Arc::new(store), config.base_url.clone())
        .with_max_code_attempts(config.code_max_attempts))
}

/// Creates a short link, prompting for the URL when it was not given.
async fn shorten(
    service: &LinkService,
    config: &Config,
    url: Option<String>,
    print_qr: bool,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let raw_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let link = service
        .create(&raw_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;
    let short_url = service.build_short_url(&link.short_code);

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Short URL: {}", short_url.bright_yellow().bold());
    println!("  Original:  {}", link.original_url.cyan());
    println!("  Code:      {}", link.short_code.bright_black());

    if print_qr {
        let qr = QrCodeGenerator::new(config.qr_code_size)
            .generate_base64(&short_url)
            .context("Failed to render QR code")?;
        println!();
        println!("{}", "QR code (PNG, base64):".bright_white());
        println!("  data:image/png;base64,{}", qr);
    }
    println!();

    Ok(())
}

/// Prints a stored link.
///
/// # Output Format
///
/// ```text
/// 🔎 Short Link
///
///   Code:      aZ09bY18
///   Short URL: https://s.example.com/aZ09bY18
///   Original:  https://example.com/some/page
///   Created:   2024-01-15 10:30
///   Hits:      42
/// ```
async fn show(service: &LinkService, code: &str) -> Result<()> {
    println!("{}", "🔎 Short Link".bright_blue().bold());
    println!();

    let link = service
        .find(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:      {}", link.short_code.bright_black());
    println!("  Short URL: {}", service.build_short_url(&link.short_code).bright_yellow());
    println!("  Original:  {}", link.original_url.cyan());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!(
        "  Hits:      {}",
        link.hit_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn check_store(redis_url: &str, config: &Config) -> Result<()> {
    println!(
        "{} {}",
        "🔍 Checking Redis connection:".bright_blue(),
        mask_connection_string(redis_url)
    );

    let store = RedisLinkStore::connect(redis_url, config.redis_connect_retries)
        .await
        .context("Failed to connect to Redis")?;

    if !store.ping().await {
        anyhow::bail!("Redis did not answer PING");
    }

    println!("{}", "✅ Redis connection OK".green().bold());
    Ok(())
}
