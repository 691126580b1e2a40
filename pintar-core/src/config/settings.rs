//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/pintar/config.toml).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# pintar configuration file
# Located at: ~/.config/pintar/config.toml
#
# This file contains non-sensitive configuration.
# Secrets are loaded from environment variables:
#   - GOOGLE_API_KEY
#
# The corpus directory can be overridden with PINTAR_DATA_DIR.

# Gemini model identifier used for generation
model = "gemini-1.5-flash"

[chat]
# Response style: "formal" or "santai"
style = "formal"
# Number of recent user/assistant pairs included in the prompt
history_window = 3

[generation]
temperature = 0.7
max_output_tokens = 256

[knowledge]
# Directory containing the per-domain .txt corpus files
data_dir = "data"
# Snippets retrieved per chat turn
top_k = 4
# What to do when a domain file is missing: "aggregate" or "empty"
missing_source = "aggregate"
embedding_url = "http://127.0.0.1:11434"
embedding_model = "all-minilm"
embedding_batch = 32

[logging]
level = "info"
"#;

/// Settings loaded from TOML configuration file.
///
/// These are non-sensitive configuration values that can be safely
/// stored in files and version controlled (excluding secrets).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Gemini model identifier used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat surface configuration
    #[serde(default)]
    pub chat: ChatSettings,

    /// Generation parameters passed per request
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Knowledge base configuration
    #[serde(default)]
    pub knowledge: KnowledgeFileSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            chat: ChatSettings::default(),
            generation: GenerationSettings::default(),
            knowledge: KnowledgeFileSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Response style applied to prompts and post-processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Formal,
    Santai,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Formal => "formal",
            Style::Santai => "santai",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Style::Formal),
            "santai" | "casual" => Ok(Style::Santai),
            _ => Err(format!("Unknown style: {} (use formal or santai)", s)),
        }
    }
}

/// Chat surface settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatSettings {
    /// Response style
    #[serde(default)]
    pub style: Style,

    /// Number of recent user/assistant pairs included in the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            history_window: default_history_window(),
        }
    }
}

/// Generation parameter settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationSettings {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens generated per response
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Knowledge base configuration as written in the TOML file.
///
/// All fields are optional here; `KnowledgeSettings` resolves them
/// to concrete values with defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KnowledgeFileSettings {
    /// Directory containing the per-domain .txt corpus files
    pub data_dir: Option<String>,

    /// Snippets retrieved per chat turn
    pub top_k: Option<usize>,

    /// Fallback when a domain file is missing ("aggregate" or "empty")
    pub missing_source: Option<super::knowledge::MissingSourcePolicy>,

    /// Embedding provider base URL
    pub embedding_url: Option<String>,

    /// Embedding model name
    pub embedding_model: Option<String>,

    /// Embedding dimension (if known)
    pub embedding_dim: Option<usize>,

    /// Embedding batch size
    pub embedding_batch: Option<usize>,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_history_window() -> usize {
    3
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    256
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    /// The file is located at `~/.config/pintar/config.toml`.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        // Create default config if it doesn't exist
        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Serialize settings to TOML content.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/pintar/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("PINTAR_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("pintar");

        Ok(config_dir.join("config.toml"))
    }

    /// Create the default configuration file.
    fn create_default_config(path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Save settings to the default configuration file path.
    pub fn save(&self) -> Result<(), SettingsError> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save settings to a specific file path.
    pub fn save_to_path(&self, path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.model, "gemini-1.5-flash");

        assert_eq!(settings.chat.style, Style::Formal);
        assert_eq!(settings.chat.history_window, 3);

        assert_eq!(settings.generation.temperature, 0.7);
        assert_eq!(settings.generation.max_output_tokens, 256);

        assert!(settings.knowledge.data_dir.is_none());
        assert!(settings.knowledge.top_k.is_none());
        assert!(settings.knowledge.embedding_url.is_none());

        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_default_config_toml_parses() {
        let settings = Settings::from_toml(DEFAULT_CONFIG_TOML).unwrap();

        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.chat.style, Style::Formal);
        assert_eq!(settings.knowledge.data_dir.as_deref(), Some("data"));
        assert_eq!(settings.knowledge.top_k, Some(4));
        assert_eq!(
            settings.knowledge.embedding_model.as_deref(),
            Some("all-minilm")
        );
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
model = "gemini-1.5-pro"

[chat]
style = "santai"
history_window = 5

[generation]
temperature = 0.2
max_output_tokens = 512

[knowledge]
data_dir = "/srv/pintar/data"
top_k = 6
missing_source = "empty"
embedding_url = "http://embedder:11434"
embedding_model = "nomic-embed-text"
embedding_dim = 768
embedding_batch = 16

[logging]
level = "debug"
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.model, "gemini-1.5-pro");
        assert_eq!(settings.chat.style, Style::Santai);
        assert_eq!(settings.chat.history_window, 5);
        assert_eq!(settings.generation.temperature, 0.2);
        assert_eq!(settings.generation.max_output_tokens, 512);
        assert_eq!(
            settings.knowledge.data_dir.as_deref(),
            Some("/srv/pintar/data")
        );
        assert_eq!(settings.knowledge.top_k, Some(6));
        assert_eq!(settings.knowledge.embedding_dim, Some(768));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_from_toml_partial() {
        // Partial config fills in defaults
        let toml = r#"
[chat]
style = "santai"
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.chat.style, Style::Santai);
        assert_eq!(settings.chat.history_window, 3);
        assert_eq!(settings.generation.max_output_tokens, 256);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut settings = Settings::default();
        settings.model = "gemini-2.0-flash".to_string();
        settings.chat.style = Style::Santai;
        settings.knowledge.data_dir = Some("corpus".to_string());
        settings.knowledge.top_k = Some(2);

        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("pintar_settings_test_{}.toml", unique));

        settings.save_to_path(&path).expect("save failed");

        let content = fs::read_to_string(&path).expect("read failed");
        let loaded = Settings::from_toml(&content).expect("parse failed");

        assert_eq!(loaded.model, "gemini-2.0-flash");
        assert_eq!(loaded.chat.style, Style::Santai);
        assert_eq!(loaded.knowledge.data_dir.as_deref(), Some("corpus"));
        assert_eq!(loaded.knowledge.top_k, Some(2));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_config_path_uses_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let value = dir.path().to_string_lossy().to_string();

        // SAFETY: test-scoped env mutation.
        unsafe { std::env::set_var("PINTAR_CONFIG_DIR", &value) };
        let path = Settings::config_path().unwrap();
        // SAFETY: test-scoped env mutation cleanup.
        unsafe { std::env::remove_var("PINTAR_CONFIG_DIR") };

        assert_eq!(path, dir.path().join("config.toml"));
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("formal".parse::<Style>().unwrap(), Style::Formal);
        assert_eq!("Santai".parse::<Style>().unwrap(), Style::Santai);
        assert_eq!(" SANTAI ".parse::<Style>().unwrap(), Style::Santai);
        assert!("sopan".parse::<Style>().is_err());
    }

    #[test]
    fn test_style_display() {
        assert_eq!(Style::Formal.to_string(), "formal");
        assert_eq!(Style::Santai.to_string(), "santai");
    }
}
