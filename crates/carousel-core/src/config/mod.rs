//! Configuration management for Carousel.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. API keys are written as `${ENV_VAR}` references and resolved
//! once at startup by [`Credentials::resolve`].

mod credentials;
mod types;
mod validate;

pub use credentials::Credentials;
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web form settings
    pub server: ServerConfig,

    /// Content settings
    pub carousel: CarouselConfig,

    /// Rate-limit backoff settings
    pub retry: RetryConfig,

    /// Text-generation provider settings
    pub llm: LlmConfig,

    /// Image-generation settings
    pub image: ImageConfig,

    /// Search settings
    pub search: SearchConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.curenaturals.carousel/config.toml
    /// - Linux: ~/.config/carousel/config.toml
    ///
    /// Falls back to ~/.carousel/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "curenaturals", "carousel")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".carousel").join("config.toml")
            })
    }

    /// Expand `~` in a user-supplied config path.
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).into_owned())
    }

    /// OpenAI settings, falling back to defaults when the table is absent.
    pub fn openai(&self) -> OpenAiConfig {
        self.llm.openai.clone().unwrap_or_default()
    }

    /// Anthropic settings, falling back to defaults when the table is absent.
    pub fn anthropic(&self) -> AnthropicConfig {
        self.llm.anthropic.clone().unwrap_or_default()
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
