//! Provider trait for abstracting text generation backends.

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No content in response")]
    NoContent,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for hosted text generation backends.
///
/// A single prompt goes in and plain text comes out. Sampling
/// parameters travel with each call so one client can serve sessions
/// with different settings.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name (for logs)
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> ProviderResult<String>;
}
