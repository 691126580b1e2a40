//! Core shared types for pintar.
//!
//! This crate holds the configuration system (secrets from environment
//! variables, settings from TOML) and the chat message types shared by the
//! knowledge engine and the chat surface.

pub mod config;
pub mod message;

pub use config::{
    Config, ConfigError, KnowledgeSettings, MissingSourcePolicy, Secrets, SecretsError, Settings,
    SettingsError, Style, load_dotenv,
};
pub use message::{ChatMessage, ChatRole};
