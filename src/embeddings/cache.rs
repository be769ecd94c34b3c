use crate::embeddings::{Embedder, Embedding, EmbeddingError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Memoizes another embedder for the duration of one scrape
///
/// Only successful results are stored; a failed string is retried the next
/// time it is requested.
pub struct CachingEmbedder<'a> {
    inner: &'a dyn Embedder,
    cache: Mutex<HashMap<String, Embedding>>,
}

impl<'a> CachingEmbedder<'a> {
    pub fn new(inner: &'a dyn Embedder) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct strings embedded so far
    pub(crate) fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn lookup(&self, text: &str) -> Option<Embedding> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
            .cloned()
    }

    fn store(&self, text: &str, embedding: &Embedding) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(text.to_string(), embedding.clone());
    }
}

#[async_trait]
impl Embedder for CachingEmbedder<'_> {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if let Some(hit) = self.lookup(text) {
            tracing::trace!("Embedding cache hit");
            return Ok(hit);
        }

        let embedding = self.inner.embed(text).await?;
        self.store(text, &embedding);
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text == "fail" {
                return Err(EmbeddingError::EmptyInput);
            }
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[tokio::test]
    async fn test_identical_text_embedded_once() {
        let inner = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let cache = CachingEmbedder::new(&inner);

        let first = cache.embed("same text").await.unwrap();
        let second = cache.embed("same text").await.unwrap();
        let other = cache.embed("other").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let cache = CachingEmbedder::new(&inner);

        assert!(cache.embed("fail").await.is_err());
        assert!(cache.embed("fail").await.is_err());

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 0);
    }
}
