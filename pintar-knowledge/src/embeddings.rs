//! Embedding provider seam and HTTP client.

use async_trait::async_trait;
use serde::Deserialize;

use pintar_core::config::KnowledgeSettings;

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Encodes text into fixed-dimension vectors.
///
/// Implementations must be deterministic for a fixed model: the same
/// input always produces the same vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Fixed output dimension of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Encode a batch of texts, one vector per input, in input order.
    ///
    /// An empty batch returns an empty result without any request.
    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>>;
}

/// Embedder backed by an Ollama-style `/api/embed` endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    dim: usize,
    batch_size: usize,
    client: reqwest::Client,
}

impl HttpEmbedder {
    /// Build the client, validating the embedding configuration up front
    /// so a misconfigured embedder fails here rather than on first use.
    pub fn new(settings: &KnowledgeSettings) -> KnowledgeResult<Self> {
        let base_url = settings
            .embedding_url
            .trim()
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(KnowledgeError::InvalidConfig(
                "embedding_url is empty".to_string(),
            ));
        }

        let model = settings.embedding_model.trim().to_string();
        if model.is_empty() {
            return Err(KnowledgeError::InvalidConfig(
                "embedding_model is empty".to_string(),
            ));
        }

        if settings.embedding_dim == 0 {
            return Err(KnowledgeError::InvalidConfig(
                "embedding_dim must be positive".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            model,
            dim: settings.embedding_dim,
            batch_size: settings.embedding_batch.max(1),
            client: reqwest::Client::new(),
        })
    }

    async fn embed_chunk(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: self.model.clone(),
            input: inputs.to_vec(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Embedding(format!(
                "embedding request failed: {status} {text}"
            )));
        }

        let payload: EmbedResponse = response.json().await?;

        let vectors = if let Some(embeddings) = payload.embeddings {
            embeddings
        } else if let Some(embedding) = payload.embedding {
            vec![embedding]
        } else {
            return Err(KnowledgeError::Embedding(
                "embedding response missing vectors".to_string(),
            ));
        };

        if vectors.len() != inputs.len() {
            return Err(KnowledgeError::EmbeddingCount {
                expected: inputs.len(),
                actual: vectors.len(),
            });
        }
        for vector in &vectors {
            if vector.len() != self.dim {
                return Err(KnowledgeError::EmbeddingDimMismatch {
                    expected: self.dim,
                    actual: vector.len(),
                });
            }
        }

        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(inputs.len());
        for chunk in inputs.chunks(self.batch_size) {
            vectors.extend(self.embed_chunk(chunk).await?);
        }
        Ok(vectors)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embeddings: Option<Vec<Vec<f32>>>,
    embedding: Option<Vec<f32>>,
}
