//! Site-Gleaner main entry point
//!
//! This is the command-line interface for the Site-Gleaner scraper and agent.

use anyhow::Context;
use clap::{Parser, Subcommand};
use site_gleaner::config::{load_config_with_hash, ApiFlavor, Config, ServiceConfig};
use site_gleaner::output::{print_statistics, render_json, render_report};
use site_gleaner::Scraper;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Gleaner: find the passage of a website that answers a question
///
/// Site-Gleaner fetches a page, follows the same-site links whose URLs look
/// most relevant to the query and returns the text chunk whose embedding is
/// closest to the query's.
#[derive(Parser, Debug)]
#[command(name = "site-gleaner")]
#[command(version = "1.0.0")]
#[command(about = "Query-driven website scraping with embedding relevance ranking", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a website and print the chunk that best matches a query
    Scrape {
        /// Root page to start from
        #[arg(long)]
        url: String,

        /// What to look for
        #[arg(long)]
        query: String,

        /// Override the number of links followed after the root page
        #[arg(long, value_name = "N")]
        max_links: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send one message to the tool-calling agent
    Ask {
        /// The user message
        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    /// Validate the configuration and print the effective settings
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Scrape {
            url,
            query,
            max_links,
            json,
        } => handle_scrape(&config, &url, &query, max_links, json, cli.quiet).await,
        Command::Ask { message } => handle_ask(&config, &message).await,
        Command::Check => {
            handle_check(&config, &config_hash);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_gleaner=info,warn"),
            1 => EnvFilter::new("site_gleaner=debug,info"),
            2 => EnvFilter::new("site_gleaner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the `scrape` command
async fn handle_scrape(
    config: &Config,
    url: &str,
    query: &str,
    max_links: Option<usize>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut scraper = Scraper::from_config(config).context("Failed to build scraper")?;
    if let Some(max_links) = max_links {
        scraper = scraper.with_max_links(max_links);
    }

    let report = scraper
        .scrape(url, query)
        .await
        .with_context(|| format!("Scrape of {} failed", url))?;

    if json {
        println!("{}", render_json(&report)?);
    } else {
        println!("{}", render_report(&report));
        if !quiet {
            println!();
            print_statistics(&report.stats);
        }
    }

    Ok(())
}

/// Handles the `ask` command
async fn handle_ask(config: &Config, message: &str) -> anyhow::Result<()> {
    let reply = site_gleaner::agent::ask(config, message)
        .await
        .context("Agent turn failed")?;
    println!("{}", reply);
    Ok(())
}

/// Handles the `check` command: prints the effective configuration
fn handle_check(config: &Config, config_hash: &str) {
    println!("=== Site-Gleaner Configuration ===\n");
    println!("Hash: {}", config_hash);

    let scraper = &config.scraper;
    println!("\nScraper:");
    println!("  Max chunk chars: {}", scraper.max_chars);
    println!("  Max links to follow: {}", scraper.max_links_to_follow);
    println!("  Fetch timeout: {}s", scraper.fetch_timeout_secs);
    println!("  User agent: {}", scraper.user_agent);
    println!("  Concurrency: {}", scraper.concurrency);
    println!("  Cache embeddings: {}", scraper.cache_embeddings);
    match scraper.crawl_deadline_secs {
        Some(secs) => println!("  Crawl deadline: {}s", secs),
        None => println!("  Crawl deadline: none"),
    }

    println!("\nEmbeddings:");
    print_service(&config.embeddings.service);
    println!("  Max input chars: {}", config.embeddings.max_input_chars);

    match &config.chat {
        Some(chat) => {
            println!("\nChat:");
            print_service(chat);
        }
        None => println!("\nChat: not configured (the `ask` command is unavailable)"),
    }

    println!("\n✓ Configuration is valid");
}

fn print_service(service: &ServiceConfig) {
    let flavor = match service.flavor {
        ApiFlavor::Azure => "azure",
        ApiFlavor::OpenAi => "openai",
    };
    println!("  Flavor: {}", flavor);
    println!("  Endpoint: {}", service.endpoint);
    println!("  Deployment: {}", service.deployment);
    if let Some(version) = &service.api_version {
        println!("  API version: {}", version);
    }
    let key_source = match (&service.api_key, &service.api_key_env) {
        (Some(_), _) => "inline".to_string(),
        (None, Some(var)) => format!("${}", var),
        (None, None) => "missing".to_string(),
    };
    println!("  API key: {}", key_source);
    println!("  Timeout: {}s", service.timeout_secs);
}
