//! Embedding module
//!
//! This module turns text into vectors and compares them:
//! - The `Embedder` trait, the seam the crawler scores through
//! - An Azure OpenAI / OpenAI-compatible HTTP implementation
//! - A per-scrape cache so identical strings are embedded once
//! - Cosine similarity

mod cache;
mod openai;
mod similarity;

pub use cache::CachingEmbedder;
pub use openai::OpenAiEmbedder;
pub use similarity::{cosine_similarity, SimilarityError};

use async_trait::async_trait;
use thiserror::Error;

/// A model-defined, fixed-length embedding vector
pub type Embedding = Vec<f32>;

/// Errors from turning text into an embedding
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding input is empty")]
    EmptyInput,

    #[error("Embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Embedding service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),
}

/// Anything that can embed a string
///
/// Implementations must be deterministic per input text for the lifetime of
/// a scrape; the crawler relies on that when it caches vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}

/// Normalizes embedding input
///
/// Trims surrounding whitespace and truncates to `max_chars` characters.
///
/// # Returns
///
/// * `Ok(String)` - Text ready to send
/// * `Err(EmbeddingError::EmptyInput)` - Nothing left after trimming
pub fn prepare_input(text: &str, max_chars: usize) -> Result<String, EmbeddingError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EmbeddingError::EmptyInput);
    }

    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            tracing::debug!(
                "Embedding input truncated to {} characters",
                max_chars
            );
            Ok(trimmed[..cut].to_string())
        }
        None => Ok(trimmed.to_string()),
    }
}
