//! Per-scrape data types: fetched pages, text chunks and ranking entries

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// A fetched HTML page
///
/// Lives only until its text and links have been extracted.
#[derive(Debug, Clone)]
pub struct Page {
    /// The requested URL
    pub url: Url,

    /// Response body, treated as HTML regardless of Content-Type
    pub html: String,

    /// When the response body was received
    pub fetched_at: DateTime<Utc>,
}

impl Page {
    pub fn new(url: Url, html: String) -> Self {
        Self {
            url,
            html,
            fetched_at: Utc::now(),
        }
    }
}

/// A sentence-aligned slice of a page's visible text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    pub text: String,
    pub source_url: String,
}

impl TextChunk {
    pub fn new(text: impl Into<String>, source_url: &Url) -> Self {
        Self {
            text: text.into(),
            source_url: source_url.to_string(),
        }
    }
}

/// A ranking entry pairing a cosine score with what was scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<T> {
    /// Cosine similarity against the query, in [-1, 1]
    pub score: f64,
    pub payload: T,
}

impl<T> ScoredItem<T> {
    pub fn new(score: f64, payload: T) -> Self {
        Self { score, payload }
    }
}
