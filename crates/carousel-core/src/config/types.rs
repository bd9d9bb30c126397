//! Sub-configuration structs with defaults.

use crate::types::Tone;
use serde::{Deserialize, Serialize};

/// HTTP server settings for the web form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the web form listens on
    pub bind: String,

    /// Maximum form body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Content settings for generated carousels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Brand the copy is written for
    pub brand: String,

    /// Maximum number of slides kept from a reply
    pub slide_count: usize,

    /// Tone preselected in the form and used when the CLI omits `--tone`
    pub default_tone: Tone,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            brand: "Cure Naturals".to_string(),
            slide_count: 9,
            default_tone: Tone::ScientificWarm,
        }
    }
}

/// Backoff policy for rate-limited text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Pause before the first retry in milliseconds
    pub initial_delay_ms: u64,

    /// Factor applied to the pause after every failed attempt
    pub multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100_000,
            multiplier: 2,
        }
    }
}

/// Text-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider: "openai" or "anthropic"
    pub provider: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// OpenAI configuration
    pub openai: Option<OpenAiConfig>,

    /// Anthropic configuration
    pub anthropic: Option<AnthropicConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            timeout_ms: 120_000,
            openai: None,
            anthropic: None,
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// API base URL
    pub endpoint: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Anthropic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// API base URL
    pub endpoint: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            endpoint: "https://api.anthropic.com/v1".to_string(),
        }
    }
}

/// Image-generation settings (OpenAI Images API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Whether the image service is configured at all
    pub enabled: bool,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Output size specifier sent with every request
    pub size: String,

    /// API base URL
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// Search settings (Tavily search API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Whether the search service is configured at all
    pub enabled: bool,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Full search URL
    pub endpoint: String,

    /// Number of sources the summary is built from
    pub max_results: u32,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: "${TAVILY_API_KEY}".to_string(),
            endpoint: "https://api.tavily.com/search".to_string(),
            max_results: 5,
            timeout_ms: 30_000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
