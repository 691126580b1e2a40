//! Configuration management for pintar.
//!
//! This module provides a unified configuration system that separates
//! secrets (from environment variables) from settings (from TOML files).
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `GOOGLE_API_KEY` - Google API key for Gemini
//!
//! ## Settings (TOML File)
//! Located at `~/.config/pintar/config.toml`:
//! ```toml
//! model = "gemini-1.5-flash"
//!
//! [chat]
//! style = "formal"
//! history_window = 3
//!
//! [generation]
//! temperature = 0.7
//! max_output_tokens = 256
//!
//! [knowledge]
//! data_dir = "data"
//! top_k = 4
//! missing_source = "aggregate"
//!
//! [logging]
//! level = "info"
//! ```

mod knowledge;
mod secrets;
mod settings;

pub use knowledge::{KnowledgeSettings, MissingSourcePolicy};
pub use secrets::{Secrets, SecretsError};
pub use settings::{
    ChatSettings, GenerationSettings, KnowledgeFileSettings, LoggingSettings, Settings,
    SettingsError, Style,
};

/// Combined configuration containing both secrets and settings.
///
/// This is the main configuration type used throughout the application.
/// It separates sensitive secrets (from env) from non-sensitive settings (from TOML).
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Model identifier is not set")]
    ModelNotSet,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// This loads:
    /// 1. Secrets from environment variables
    /// 2. Settings from TOML file (creating defaults if needed)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `GOOGLE_API_KEY` is missing
    /// - The configured model identifier is empty
    /// - The TOML file cannot be read or parsed
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let settings = Settings::load()?;

        if settings.model.trim().is_empty() {
            return Err(ConfigError::ModelNotSet);
        }

        Ok(Self { secrets, settings })
    }

    /// Get the Google API key.
    pub fn google_api_key(&self) -> &str {
        &self.secrets.google_api_key
    }

    /// Get the generation model identifier.
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Resolve the knowledge base settings with defaults applied.
    pub fn knowledge(&self) -> KnowledgeSettings {
        KnowledgeSettings::from(&self.settings.knowledge)
    }
}

/// Load .env file if it exists (for development convenience).
///
/// This is called automatically by `Config::load()` but is also
/// exported for use in other contexts.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
