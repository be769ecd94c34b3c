//! Scrape results and their user-facing renderings

use crate::state::{CrawlStats, ScoredItem, TextChunk};
use serde::Serialize;
use std::fmt::Display;

/// Message returned when nothing could be scored
pub const NO_CONTENT_MESSAGE: &str = "No relevant content found on the crawled pages.";

/// Outcome of one scrape
///
/// `best_match` is `None` when no chunk was collected or none could be
/// scored; that is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    pub url: String,
    pub query: String,
    pub best_match: Option<ScoredItem<TextChunk>>,
    pub stats: CrawlStats,
}

/// Renders a report as the single line handed back to the chat model
///
/// # Example
///
/// ```
/// use site_gleaner::output::{render_report, ScrapeReport};
/// use site_gleaner::state::{CrawlStats, ScoredItem, TextChunk};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let report = ScrapeReport {
///     url: url.to_string(),
///     query: "loyal".to_string(),
///     best_match: Some(ScoredItem::new(0.8731, TextChunk::new("Dogs are loyal too.", &url))),
///     stats: CrawlStats::default(),
/// };
/// assert_eq!(
///     render_report(&report),
///     "Best match from crawled pages (score 0.87): Dogs are loyal too."
/// );
/// ```
pub fn render_report(report: &ScrapeReport) -> String {
    match &report.best_match {
        Some(best) => format!(
            "Best match from crawled pages (score {:.2}): {}",
            best.score, best.payload.text
        ),
        None => NO_CONTENT_MESSAGE.to_string(),
    }
}

/// Renders a failure the way the chat model expects it
pub fn render_error(error: &impl Display) -> String {
    format!("Error: {}", error)
}

/// Renders a report as pretty-printed JSON
pub fn render_json(report: &ScrapeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Prints crawl counters to stdout
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Scrape Statistics ===");
    println!("Pages fetched:      {}", stats.pages_fetched);
    println!("Fetch failures:     {}", stats.fetch_failures);
    println!("Links discovered:   {}", stats.links_discovered);
    println!("Links ranked:       {}", stats.links_ranked);
    println!("Chunks collected:   {}", stats.chunks_collected);
    println!("Chunks scored:      {}", stats.chunks_scored);
    println!("Embedding failures: {}", stats.embedding_failures);
}
