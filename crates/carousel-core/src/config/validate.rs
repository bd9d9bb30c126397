//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

const PROVIDERS: &[&str] = &["openai", "anthropic"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "retry.max_attempts must be > 0".into(),
            ));
        }
        if self.retry.multiplier == 0 {
            return Err(ConfigError::ValidationError(
                "retry.multiplier must be > 0".into(),
            ));
        }
        if self.carousel.slide_count == 0 {
            return Err(ConfigError::ValidationError(
                "carousel.slide_count must be > 0".into(),
            ));
        }
        if !PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "llm.provider must be one of {}, got '{}'",
                PROVIDERS.join(", "),
                self.llm.provider
            )));
        }
        if self.llm.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_ms must be > 0".into(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "llm.max_tokens must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.image.enabled && self.image.size.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "image.size must not be empty".into(),
            ));
        }
        if self.search.enabled && self.search.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_results must be > 0".into(),
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.max_body_bytes must be > 0".into(),
            ));
        }
        Ok(())
    }
}
