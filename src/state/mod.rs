//! State module for a single scrape
//!
//! This module provides the data a scrape produces and carries between its
//! phases.
//!
//! # Components
//!
//! - `Page`: A fetched HTML document
//! - `TextChunk`: A sentence-aligned slice of visible text and where it came from
//! - `ScoredItem`: A similarity score attached to a chunk or link
//! - `CrawlState`: Visited set, query vector and collected chunks of one crawl

mod crawl_state;
mod page;

// Re-export main types
pub use crawl_state::{CrawlState, CrawlStats};
pub use page::{Page, ScoredItem, TextChunk};
