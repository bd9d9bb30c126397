//! Startup credential resolution.
//!
//! Every key the enabled services need is resolved before any work starts.
//! A missing key is a [`ConfigError::MissingCredential`]; callers must not
//! continue partially configured.

use super::Config;
use crate::error::ConfigError;

/// Resolve a `${ENV_VAR}` reference, or take the value literally.
fn resolve_with(value: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        lookup(var_name).filter(|v| !v.trim().is_empty())
    } else if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// API keys for the enabled services, resolved once and passed explicitly
/// to provider constructors.
#[derive(Clone)]
pub struct Credentials {
    /// Key for the active text-generation provider
    pub llm_api_key: String,

    /// Present when `image.enabled`
    pub image_api_key: Option<String>,

    /// Present when `search.enabled`
    pub search_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &"<redacted>")
            .field("image_api_key", &self.image_api_key.as_ref().map(|_| "<redacted>"))
            .field("search_api_key", &self.search_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    pub fn resolve(config: &Config) -> Result<Self, ConfigError> {
        Self::resolve_from(config, |name: &str| std::env::var(name).ok())
    }

    /// Resolve credentials with a custom variable lookup.
    pub fn resolve_from(
        config: &Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let llm_api_key = match config.llm.provider.as_str() {
            "anthropic" => require("llm.anthropic.api_key", &config.anthropic().api_key, &lookup)?,
            _ => require("llm.openai.api_key", &config.openai().api_key, &lookup)?,
        };

        let image_api_key = if config.image.enabled {
            Some(require("image.api_key", &config.image.api_key, &lookup)?)
        } else {
            None
        };

        let search_api_key = if config.search.enabled {
            Some(require("search.api_key", &config.search.api_key, &lookup)?)
        } else {
            None
        };

        Ok(Self {
            llm_api_key,
            image_api_key,
            search_api_key,
        })
    }
}

fn require(
    name: &str,
    value: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    resolve_with(value, lookup).ok_or_else(|| {
        let hint = if value.starts_with("${") && value.ends_with('}') {
            format!("Set {} env var.", &value[2..value.len() - 1])
        } else {
            format!("Set {name} in the config file.")
        };
        ConfigError::MissingCredential {
            name: name.to_string(),
            hint,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_with() {
        let lookup = env(&[("SET_KEY", "value")]);
        assert_eq!(resolve_with("plain-key", &lookup), Some("plain-key".to_string()));
        assert_eq!(resolve_with("", &lookup), None);
        assert_eq!(resolve_with("${SET_KEY}", &lookup), Some("value".to_string()));
        assert_eq!(resolve_with("${UNSET_KEY}", &lookup), None);
    }

    #[test]
    fn test_resolve_defaults_needs_openai_key_for_text_and_images() {
        let config = Config::default();
        let creds = Credentials::resolve_from(&config, env(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(creds.llm_api_key, "sk-test");
        assert_eq!(creds.image_api_key.as_deref(), Some("sk-test"));
        assert!(creds.search_api_key.is_none());
    }

    #[test]
    fn test_missing_llm_key_is_fatal() {
        let config = Config::default();
        let err = Credentials::resolve_from(&config, env(&[])).unwrap_err();
        match err {
            ConfigError::MissingCredential { name, hint } => {
                assert_eq!(name, "llm.openai.api_key");
                assert!(hint.contains("OPENAI_API_KEY"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blank_env_value_counts_as_missing() {
        let config = Config::default();
        assert!(Credentials::resolve_from(&config, env(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_enabled_search_requires_its_key() {
        let mut config = Config::default();
        config.search.enabled = true;
        let err = Credentials::resolve_from(&config, env(&[("OPENAI_API_KEY", "sk")])).unwrap_err();
        assert!(err.to_string().contains("search.api_key"));

        let creds = Credentials::resolve_from(
            &config,
            env(&[("OPENAI_API_KEY", "sk"), ("TAVILY_API_KEY", "tvly")]),
        )
        .unwrap();
        assert_eq!(creds.search_api_key.as_deref(), Some("tvly"));
    }

    #[test]
    fn test_anthropic_provider_uses_its_own_key() {
        let mut config = Config::default();
        config.llm.provider = "anthropic".into();
        config.image.enabled = false;
        let creds =
            Credentials::resolve_from(&config, env(&[("ANTHROPIC_API_KEY", "ak")])).unwrap();
        assert_eq!(creds.llm_api_key, "ak");
        assert!(creds.image_api_key.is_none());
    }

    #[test]
    fn test_literal_key_in_config_is_used_verbatim() {
        let mut config = Config::default();
        config.image.enabled = false;
        config.llm.openai = Some(crate::config::OpenAiConfig {
            api_key: "sk-literal".into(),
            ..Default::default()
        });
        let creds = Credentials::resolve_from(&config, env(&[])).unwrap();
        assert_eq!(creds.llm_api_key, "sk-literal");
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials {
            llm_api_key: "sk-secret".into(),
            image_api_key: Some("sk-secret".into()),
            search_api_key: None,
        };
        assert!(!format!("{creds:?}").contains("sk-secret"));
    }
}
