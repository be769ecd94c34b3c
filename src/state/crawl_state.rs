//! State owned by a single scrape invocation

use crate::embeddings::Embedding;
use crate::state::TextChunk;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Counters describing what one scrape did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Pages fetched successfully (root included)
    pub pages_fetched: usize,

    /// Fetches that failed and contributed no content
    pub fetch_failures: usize,

    /// Same-site links found on the root page
    pub links_discovered: usize,

    /// Links that received an anchor-text score
    pub links_ranked: usize,

    /// Chunks collected across all visited pages
    pub chunks_collected: usize,

    /// Chunks that received a score in the final ranking
    pub chunks_scored: usize,

    /// Link or chunk embeddings (or scores) that failed and were skipped
    pub embedding_failures: usize,
}

/// Mutable state of one crawl
///
/// Created per invocation and dropped when the scrape returns; nothing in
/// here is shared between scrapes.
#[derive(Debug)]
pub struct CrawlState {
    /// The page the crawl started from
    pub root: Url,

    /// Every URL fetched (or about to be fetched) during this crawl
    pub visited: HashSet<Url>,

    /// Query embedding; set once the link-ranking phase starts
    pub query_vector: Option<Embedding>,

    /// Chunks from every visited page, in visit order
    pub collected_chunks: Vec<TextChunk>,

    pub stats: CrawlStats,
}

impl CrawlState {
    pub fn new(root: Url) -> Self {
        Self {
            root,
            visited: HashSet::new(),
            query_vector: None,
            collected_chunks: Vec::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Marks a URL as visited
    ///
    /// Returns false if the URL was already visited, in which case it must
    /// not be fetched again.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.clone())
    }

    /// Appends chunks produced from one page
    pub fn add_chunks(&mut self, chunks: impl IntoIterator<Item = TextChunk>) {
        let before = self.collected_chunks.len();
        self.collected_chunks.extend(chunks);
        self.stats.chunks_collected += self.collected_chunks.len() - before;
    }
}
