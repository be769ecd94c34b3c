//! Azure OpenAI / OpenAI-compatible embedding client.

use crate::client::{build_service_client, service_url};
use crate::config::EmbeddingsConfig;
use crate::embeddings::{prepare_input, Embedder, Embedding, EmbeddingError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Embeds one string per request against a hosted embedding deployment
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    max_input_chars: usize,
}

impl OpenAiEmbedder {
    /// Builds a client from the `[embeddings]` config section
    pub fn new(config: &EmbeddingsConfig) -> crate::Result<Self> {
        let client = build_service_client(&config.service)?;
        Ok(Self {
            client,
            endpoint: service_url(&config.service, "embeddings"),
            model: config.service.deployment.clone(),
            max_input_chars: config.max_input_chars,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let input = prepare_input(text, self.max_input_chars)?;
        tracing::debug!(
            "Embedding text '{}' ({} chars)",
            input.chars().take(50).collect::<String>(),
            input.chars().count()
        );

        let inputs = [input.as_str()];
        let request = EmbeddingRequest {
            model: &self.model,
            input: &inputs,
        };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(EmbeddingError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|entry| entry.embedding)
            .ok_or_else(|| {
                EmbeddingError::MalformedResponse("response contained no embeddings".to_string())
            })?;

        if embedding.is_empty() {
            return Err(EmbeddingError::MalformedResponse(
                "embedding vector is empty".to_string(),
            ));
        }

        Ok(embedding)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
