//! Domain knowledge base: corpus + embeddings + search index.

use std::sync::Arc;

use pintar_core::config::KnowledgeSettings;
use tracing::info;

use crate::corpus::{load_corpus, normalize_domain};
use crate::embeddings::Embedder;
use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::index::VectorIndex;

/// Chunks returned by [`KnowledgeBase::search_default`].
pub const DEFAULT_TOP_K: usize = 3;

/// In-memory knowledge base for one domain.
///
/// Built in one synchronous pipeline (load, embed, index) so an
/// unreachable embedder fails the build instead of producing a
/// half-initialized value. The embedder is injected; there is no
/// process-wide cache of built bases.
pub struct KnowledgeBase {
    domain: String,
    corpus: Vec<String>,
    index: Option<VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl KnowledgeBase {
    /// Load the domain corpus, embed it, and build the search index.
    ///
    /// An empty corpus produces a working base that answers every
    /// search with no results (`index` stays unset).
    pub async fn build(
        domain: &str,
        settings: &KnowledgeSettings,
        embedder: Arc<dyn Embedder>,
    ) -> KnowledgeResult<Self> {
        let domain = normalize_domain(domain);
        let corpus = load_corpus(
            &settings.resolved_data_dir(),
            &domain,
            settings.missing_source,
        )?;

        let index = if corpus.is_empty() {
            None
        } else {
            let vectors = embedder.embed_batch(&corpus).await?;
            Some(VectorIndex::build(embedder.dimension(), vectors)?)
        };

        info!(domain = %domain, chunks = corpus.len(), "knowledge base ready");

        Ok(Self {
            domain,
            corpus,
            index,
            embedder,
        })
    }

    /// Normalized domain this base was built for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_none()
    }

    /// Whether this base already serves the requested domain.
    /// Comparison is case-insensitive; callers rebuild when it fails.
    pub fn matches_domain(&self, domain: &str) -> bool {
        self.domain == normalize_domain(domain)
    }

    /// Retrieve the `k` chunks most similar to `query`, best first.
    ///
    /// Degenerate inputs (blank query, `k == 0`, empty corpus) return an
    /// empty list without touching the embedder.
    pub async fn search(&self, query: &str, k: usize) -> KnowledgeResult<Vec<String>> {
        let Some(index) = &self.index else {
            return Ok(Vec::new());
        };
        if query.trim().is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let vectors = self.embedder.embed_batch(&[query.to_string()]).await?;
        let Some(vector) = vectors.first() else {
            return Err(KnowledgeError::EmbeddingCount {
                expected: 1,
                actual: 0,
            });
        };

        let hits = index.search(vector, k)?;
        let mut chunks = Vec::with_capacity(hits.len());
        for (row, _score) in hits {
            // Rows beyond the corpus cannot come from a base built here,
            // but skipping them keeps a bad index from panicking.
            if let Some(chunk) = self.corpus.get(row) {
                chunks.push(chunk.clone());
            }
        }

        Ok(chunks)
    }

    /// [`search`](Self::search) with the default chunk count.
    pub async fn search_default(&self, query: &str) -> KnowledgeResult<Vec<String>> {
        self.search(query, DEFAULT_TOP_K).await
    }
}
