//! Text-generation provider trait and request/response types.
//!
//! Defines the interface that all text providers implement, plus the
//! factory that creates the configured provider.

use crate::config::{Config, Credentials};
use crate::error::{ConfigError, RemoteResult};
use async_trait::async_trait;
use std::time::Duration;

/// A single prompt for the text-generation service.
#[derive(Debug, Clone)]
pub struct TextRequest {
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// The response from a text-generation call.
#[derive(Debug, Clone)]
pub struct TextResponse {
    /// Generated text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all text-generation providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn TextProvider>` for dynamic dispatch).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logging (e.g., "openai", "anthropic").
    fn name(&self) -> &str;

    /// Generate text for the given request.
    ///
    /// HTTP 429 must surface as `RemoteError::RateLimited`.
    async fn generate(&self, request: &TextRequest) -> RemoteResult<TextResponse>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Factory that creates the configured text provider.
pub struct TextProviderFactory;

impl TextProviderFactory {
    /// Create the provider named by `llm.provider`, keyed with the
    /// already-resolved credential.
    pub fn create(
        config: &Config,
        credentials: &Credentials,
    ) -> Result<Box<dyn TextProvider>, ConfigError> {
        let timeout = Duration::from_millis(config.llm.timeout_ms);
        match config.llm.provider.as_str() {
            "openai" => {
                let cfg = config.openai();
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &cfg.endpoint,
                    &credentials.llm_api_key,
                    &cfg.model,
                    timeout,
                )))
            }
            "anthropic" => {
                let cfg = config.anthropic();
                Ok(Box::new(super::anthropic::AnthropicProvider::new(
                    &cfg.endpoint,
                    &credentials.llm_api_key,
                    &cfg.model,
                    timeout,
                )))
            }
            other => Err(ConfigError::ValidationError(format!(
                "Unknown LLM provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            llm_api_key: "sk-test".into(),
            image_api_key: None,
            search_api_key: None,
        }
    }

    #[test]
    fn test_factory_creates_configured_provider() {
        let mut config = Config::default();
        let provider = TextProviderFactory::create(&config, &credentials()).unwrap();
        assert_eq!(provider.name(), "openai");

        config.llm.provider = "anthropic".into();
        let provider = TextProviderFactory::create(&config, &credentials()).unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.timeout(), Duration::from_millis(config.llm.timeout_ms));
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let mut config = Config::default();
        config.llm.provider = "ollama".into();
        let err = TextProviderFactory::create(&config, &credentials())
            .err()
            .unwrap();
        assert!(err.to_string().contains("ollama"));
    }
}
