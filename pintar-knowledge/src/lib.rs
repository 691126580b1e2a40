//! Semantic retrieval subsystem for pintar.
//!
//! Pipeline: a domain corpus of line chunks is embedded once and held in
//! an exact inner-product index; queries are embedded the same way and
//! matched against it.

pub mod base;
pub mod corpus;
pub mod embeddings;
pub mod errors;
pub mod index;

pub use pintar_core::config::{KnowledgeSettings, MissingSourcePolicy};

pub use base::{DEFAULT_TOP_K, KnowledgeBase};
pub use embeddings::{Embedder, HttpEmbedder};
pub use errors::{KnowledgeError, KnowledgeResult};
pub use index::VectorIndex;
