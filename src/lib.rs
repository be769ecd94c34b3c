//! Site-Gleaner: query-driven website scraping with embedding relevance ranking
//!
//! This crate fetches a page, follows a bounded set of same-site links ranked
//! by how well their URLs match a query, splits every visited page into
//! sentence-aligned chunks and returns the chunk whose embedding is closest to
//! the query embedding. A small tool-calling agent exposes the scraper to a
//! hosted chat model.

pub mod agent;
pub mod client;
pub mod config;
pub mod crawler;
pub mod embeddings;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Gleaner operations
#[derive(Debug, Error)]
pub enum GleanerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Agent error: {0}")]
    Agent(#[from] agent::AgentError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),
}

/// Failures that end a scrape invocation
///
/// Per-page and per-chunk failures never show up here; they are logged and
/// counted in [`state::CrawlStats`]. Only failures that make ranking
/// impossible abort the crawl.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to embed query: {0}")]
    QueryEmbedding(#[source] embeddings::EmbeddingError),

    #[error("Crawl exceeded its deadline of {0:?}")]
    DeadlineExceeded(std::time::Duration),
}

/// Result type alias for Site-Gleaner operations
pub type Result<T> = std::result::Result<T, GleanerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ScrapeOptions, Scraper};
pub use state::{CrawlState, ScoredItem, TextChunk};
