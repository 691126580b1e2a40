//! Knowledge base configuration types.
//!
//! These types define the resolved (non-optional) settings used by
//! `pintar-knowledge`. They are created from the user-facing
//! `KnowledgeFileSettings` TOML struct via `From`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::settings::KnowledgeFileSettings;

/// Fallback applied when a domain's corpus file does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSourcePolicy {
    /// Aggregate every .txt file in the data directory, in filename order.
    #[default]
    Aggregate,
    /// Start with an empty corpus.
    Empty,
}

/// Resolved knowledge base settings (all values filled with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub missing_source: MissingSourcePolicy,
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
    #[serde(default = "default_embedding_batch")]
    pub embedding_batch: usize,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            top_k: default_top_k(),
            missing_source: MissingSourcePolicy::default(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            embedding_dim: default_embedding_dim(),
            embedding_batch: default_embedding_batch(),
        }
    }
}

impl KnowledgeSettings {
    /// Corpus directory, honoring the `PINTAR_DATA_DIR` override.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("PINTAR_DATA_DIR") {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.data_dir.clone()
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_top_k() -> usize {
    4
}

fn default_embedding_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

fn default_embedding_dim() -> usize {
    384
}

fn default_embedding_batch() -> usize {
    32
}

impl From<&KnowledgeFileSettings> for KnowledgeSettings {
    fn from(value: &KnowledgeFileSettings) -> Self {
        let mut settings = KnowledgeSettings::default();
        if let Some(dir) = &value.data_dir {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(top_k) = value.top_k {
            settings.top_k = top_k;
        }
        if let Some(policy) = value.missing_source {
            settings.missing_source = policy;
        }
        if let Some(url) = &value.embedding_url {
            settings.embedding_url = url.clone();
        }
        if let Some(model) = &value.embedding_model {
            settings.embedding_model = model.clone();
        }
        if let Some(dim) = value.embedding_dim {
            settings.embedding_dim = dim;
        }
        if let Some(batch) = value.embedding_batch {
            settings.embedding_batch = batch;
        }
        settings
    }
}
