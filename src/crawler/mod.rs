//! Crawler module for query-driven page collection
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching behind the [`Fetcher`] seam
//! - Visible-text and internal-link extraction
//! - Sentence-aligned chunking
//! - Scrape coordination and relevance ranking

mod chunker;
mod coordinator;
mod fetcher;
mod parser;

pub use chunker::{chunk_text, split_sentences, DEFAULT_MAX_CHARS};
pub use coordinator::{ScrapeOptions, Scraper, MAX_LINKS_TO_FOLLOW};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use parser::{extract_visible_text, get_internal_links};

use crate::config::Config;
use crate::output::ScrapeReport;

/// Runs a single scrape from a loaded configuration
///
/// This is the main entry point for one-shot use. It will:
/// 1. Build the HTTP fetcher and embedding client
/// 2. Fetch the root page and rank its same-site links
/// 3. Visit the best links and rank every collected chunk
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `url` - Root page to start from
/// * `query` - What to look for
///
/// # Returns
///
/// * `Ok(ScrapeReport)` - Scrape finished, with or without a match
/// * `Err(GleanerError)` - Client construction or the scrape itself failed
pub async fn scrape(config: &Config, url: &str, query: &str) -> crate::Result<ScrapeReport> {
    let scraper = Scraper::from_config(config)?;
    Ok(scraper.scrape(url, query).await?)
}
