//! Error types for the chat surface.

use crate::providers::ProviderError;

/// Errors surfaced by a chat session
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] pintar_knowledge::KnowledgeError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub type ChatResult<T> = Result<T, ChatError>;
