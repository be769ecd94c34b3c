//! Scrape coordinator - query-driven crawl orchestration
//!
//! A scrape runs five phases in order, never looping back:
//! 1. Seed: fetch and chunk the root page
//! 2. Discover: collect same-site links from the root page
//! 3. Rank links: score each link's URL-derived anchor text against the query
//! 4. Crawl: fetch and chunk the best-ranked links
//! 5. Final ranking: score every chunk and keep the best one
//!
//! Failures of a single fetch or embedding are logged, counted and skipped.
//! Only a failed query embedding (or an exceeded deadline) ends the scrape
//! with an error.

use crate::config::{Config, ScraperConfig};
use crate::crawler::chunker::{chunk_text, DEFAULT_MAX_CHARS};
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::parser::{extract_visible_text, get_internal_links};
use crate::embeddings::{
    cosine_similarity, CachingEmbedder, Embedder, Embedding, EmbeddingError, OpenAiEmbedder,
    SimilarityError,
};
use crate::output::{render_error, render_report, ScrapeReport};
use crate::state::{CrawlState, Page, ScoredItem, TextChunk};
use crate::url::anchor_text;
use crate::ScrapeError;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Default number of ranked links visited after the root page
pub const MAX_LINKS_TO_FOLLOW: usize = 10;

/// Tunables for one scraper
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOptions {
    /// Soft chunk length limit, in characters
    pub max_chars: usize,

    /// Links visited after the root; 0 scrapes the root page only
    pub max_links_to_follow: usize,

    /// Fetches or embeddings in flight at once
    pub concurrency: usize,

    /// Embed identical strings once per scrape
    pub cache_embeddings: bool,

    /// Upper bound on the duration of one scrape
    pub crawl_deadline: Option<Duration>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_links_to_follow: MAX_LINKS_TO_FOLLOW,
            concurrency: 1,
            cache_embeddings: true,
            crawl_deadline: None,
        }
    }
}

impl From<&ScraperConfig> for ScrapeOptions {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_chars: config.max_chars,
            max_links_to_follow: config.max_links_to_follow,
            concurrency: config.concurrency.max(1),
            cache_embeddings: config.cache_embeddings,
            crawl_deadline: config.crawl_deadline_secs.map(Duration::from_secs),
        }
    }
}

/// Why a single link or chunk could not be scored
#[derive(Debug, Error)]
enum ScoreError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}

/// Finds the passage of a website that best answers a query
pub struct Scraper {
    fetcher: Arc<dyn Fetcher>,
    embedder: Arc<dyn Embedder>,
    options: ScrapeOptions,
}

impl Scraper {
    /// Creates a scraper from its collaborators
    pub fn new(fetcher: Arc<dyn Fetcher>, embedder: Arc<dyn Embedder>, options: ScrapeOptions) -> Self {
        Self {
            fetcher,
            embedder,
            options,
        }
    }

    /// Creates a scraper that fetches over HTTP and embeds with the configured service
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to scrape
    /// * `Err(GleanerError)` - HTTP client construction failed or the API key is missing
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(&config.scraper)?;
        let embedder = OpenAiEmbedder::new(&config.embeddings)?;
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(embedder),
            ScrapeOptions::from(&config.scraper),
        ))
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// Overrides the number of links followed after the root page
    pub fn with_max_links(mut self, max_links_to_follow: usize) -> Self {
        self.options.max_links_to_follow = max_links_to_follow;
        self
    }

    /// Scrapes `url` and returns the chunk most similar to `query`
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - With a best match, or without one if nothing could be scored
    /// * `Err(ScrapeError)` - Bad URL, failed query embedding or exceeded deadline
    ///
    /// # Example
    ///
    /// ```no_run
    /// use site_gleaner::config::load_config;
    /// use site_gleaner::Scraper;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = load_config(Path::new("gleaner.toml"))?;
    /// let scraper = Scraper::from_config(&config)?;
    /// let report = scraper.scrape("https://example.com/", "pricing").await?;
    /// if let Some(best) = report.best_match {
    ///     println!("{:.2}: {}", best.score, best.payload.text);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(&self, url: &str, query: &str) -> Result<ScrapeReport, ScrapeError> {
        let root = parse_root_url(url)?;
        let run = self.run(root, query);

        match self.options.crawl_deadline {
            Some(deadline) => tokio::time::timeout(deadline, run)
                .await
                .map_err(|_| ScrapeError::DeadlineExceeded(deadline))?,
            None => run.await,
        }
    }

    /// Tool entry point: always returns a human-readable string
    pub async fn scrape_website(&self, url: &str, query: &str) -> String {
        match self.scrape(url, query).await {
            Ok(report) => render_report(&report),
            Err(e) => {
                tracing::error!("Scrape of {} failed: {}", url, e);
                render_error(&e)
            }
        }
    }

    async fn run(&self, root: Url, query: &str) -> Result<ScrapeReport, ScrapeError> {
        let start_time = Instant::now();
        let cache = CachingEmbedder::new(self.embedder.as_ref());
        let embedder: &dyn Embedder = if self.options.cache_embeddings {
            &cache
        } else {
            self.embedder.as_ref()
        };

        let mut state = CrawlState::new(root);
        tracing::info!("Scraping {} for '{}'", state.root, query);

        let root_html = self.seed(&mut state).await;
        let links = discover(&mut state, &root_html);

        if state.collected_chunks.is_empty() && links.is_empty() {
            tracing::info!("Nothing to rank on {}", state.root);
            return Ok(finish(state, query, None));
        }

        let query_vector = embedder
            .embed(query)
            .await
            .map_err(ScrapeError::QueryEmbedding)?;
        state.query_vector = Some(query_vector.clone());

        let ranked = self
            .rank_links(embedder, &mut state, &query_vector, links)
            .await;
        self.crawl_top_links(&mut state, ranked).await;
        let best = self.rank_chunks(embedder, &mut state, &query_vector).await;

        tracing::info!(
            "Scrape of {} finished in {:?}: {} pages, {} chunks, {} scored",
            state.root,
            start_time.elapsed(),
            state.stats.pages_fetched,
            state.stats.chunks_collected,
            state.stats.chunks_scored
        );
        if self.options.cache_embeddings {
            tracing::debug!("Embedding cache held {} distinct strings", cache.len());
        }

        Ok(finish(state, query, best))
    }

    /// Phase 1: fetches and chunks the root page, returning its HTML
    ///
    /// A failed fetch yields an empty document so the remaining phases run
    /// on whatever else is available.
    async fn seed(&self, state: &mut CrawlState) -> String {
        let root = state.root.clone();
        state.mark_visited(&root);

        match self.fetcher.fetch(&root).await {
            Ok(page) => {
                self.collect_page(state, &page);
                page.html
            }
            Err(e) => {
                record_fetch_failure(state, &e);
                String::new()
            }
        }
    }

    /// Phase 3: scores each link's anchor text against the query
    async fn rank_links(
        &self,
        embedder: &dyn Embedder,
        state: &mut CrawlState,
        query: &[f32],
        links: Vec<Url>,
    ) -> Vec<ScoredItem<Url>> {
        if self.options.max_links_to_follow == 0 {
            return Vec::new();
        }

        let candidates: Vec<(Url, String)> = links
            .into_iter()
            .filter_map(|link| match anchor_text(&link) {
                Some(text) => Some((link, text)),
                None => {
                    tracing::debug!("Skipping {}: no anchor text", link);
                    None
                }
            })
            .collect();

        let results: Vec<(Url, Result<f64, ScoreError>)> = stream::iter(candidates)
            .map(|(link, text)| async move {
                let score = score_text(embedder, query, &text).await;
                (link, score)
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let mut ranked = Vec::with_capacity(results.len());
        for (link, result) in results {
            match result {
                Ok(score) => {
                    tracing::debug!("Link {} scored {:.3}", link, score);
                    ranked.push(ScoredItem::new(score, link));
                }
                Err(e) => {
                    tracing::warn!("Skipping link {}: {}", link, e);
                    state.stats.embedding_failures += 1;
                }
            }
        }

        state.stats.links_ranked = ranked.len();
        ranked
    }

    /// Phase 4: visits the best-ranked links that were not visited yet
    async fn crawl_top_links(&self, state: &mut CrawlState, mut ranked: Vec<ScoredItem<Url>>) {
        // Stable sort keeps discovery order among equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        let targets: Vec<Url> = ranked
            .into_iter()
            .take(self.options.max_links_to_follow)
            .map(|item| item.payload)
            .filter(|link| state.mark_visited(link))
            .collect();

        if targets.is_empty() {
            return;
        }
        tracing::info!("Following {} links from {}", targets.len(), state.root);

        let fetcher = self.fetcher.as_ref();
        let pages: Vec<Result<Page, FetchError>> = stream::iter(targets)
            .map(|link| async move { fetcher.fetch(&link).await })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        for result in pages {
            match result {
                Ok(page) => self.collect_page(state, &page),
                Err(e) => record_fetch_failure(state, &e),
            }
        }
    }

    /// Phase 5: scores every collected chunk and keeps the first maximum
    async fn rank_chunks(
        &self,
        embedder: &dyn Embedder,
        state: &mut CrawlState,
        query: &[f32],
    ) -> Option<ScoredItem<TextChunk>> {
        let results: Vec<(usize, Result<f64, ScoreError>)> =
            stream::iter(state.collected_chunks.iter().enumerate())
                .map(|(idx, chunk)| async move {
                    let score = score_text(embedder, query, &chunk.text).await;
                    (idx, score)
                })
                .buffered(self.options.concurrency.max(1))
                .collect()
                .await;

        let mut best: Option<(usize, f64)> = None;
        for (idx, result) in results {
            match result {
                Ok(score) => {
                    state.stats.chunks_scored += 1;
                    if best.map_or(true, |(_, top)| score > top) {
                        best = Some((idx, score));
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping chunk {} from {}: {}",
                        idx,
                        state.collected_chunks[idx].source_url,
                        e
                    );
                    state.stats.embedding_failures += 1;
                }
            }
        }

        best.map(|(idx, score)| ScoredItem::new(score, state.collected_chunks[idx].clone()))
    }

    /// Extracts, chunks and stores a fetched page
    fn collect_page(&self, state: &mut CrawlState, page: &Page) {
        state.stats.pages_fetched += 1;

        let text = extract_visible_text(&page.html);
        let chunks: Vec<TextChunk> = chunk_text(&text, self.options.max_chars)
            .into_iter()
            .map(|chunk| TextChunk::new(chunk, &page.url))
            .collect();

        tracing::debug!("Collected {} chunks from {}", chunks.len(), page.url);
        state.add_chunks(chunks);
    }
}

/// Phase 2: same-site links on the root page
fn discover(state: &mut CrawlState, root_html: &str) -> Vec<Url> {
    let links = get_internal_links(&state.root, root_html);
    state.stats.links_discovered = links.len();
    tracing::debug!("Discovered {} internal links on {}", links.len(), state.root);
    links
}

async fn score_text(embedder: &dyn Embedder, query: &[f32], text: &str) -> Result<f64, ScoreError> {
    let vector: Embedding = embedder.embed(text).await?;
    Ok(cosine_similarity(query, &vector)?)
}

fn record_fetch_failure(state: &mut CrawlState, error: &FetchError) {
    tracing::warn!("Fetch failed, continuing without page: {}", error);
    state.stats.fetch_failures += 1;
}

fn finish(state: CrawlState, query: &str, best_match: Option<ScoredItem<TextChunk>>) -> ScrapeReport {
    ScrapeReport {
        url: state.root.to_string(),
        query: query.to_string(),
        best_match,
        stats: state.stats,
    }
}

fn parse_root_url(url: &str) -> Result<Url, ScrapeError> {
    let root = Url::parse(url.trim()).map_err(|source| ScrapeError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    match root.scheme() {
        "http" | "https" => Ok(root),
        other => Err(ScrapeError::UnsupportedScheme(other.to_string())),
    }
}
