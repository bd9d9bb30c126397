//! The `carousel config` command for configuration management.

use carousel_core::{Config, Credentials};
use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Validate config and resolve API keys without calling any service
    Check,
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, explicit_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = super::load_config(explicit_path)?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", super::config_path(explicit_path).display());
        }

        ConfigCommand::Init { force } => {
            let path = super::config_path(explicit_path);

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Check => {
            let config = super::load_config(explicit_path)?;
            let credentials = Credentials::resolve(&config)?;
            for line in service_summary(&config, &credentials) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// One line per service: what is enabled and which model it uses.
fn service_summary(config: &Config, credentials: &Credentials) -> Vec<String> {
    let model = match config.llm.provider.as_str() {
        "anthropic" => config.anthropic().model,
        _ => config.openai().model,
    };
    let enabled = |on: bool| if on { "enabled" } else { "disabled" };

    vec![
        format!("text:   {} ({model})", config.llm.provider),
        format!(
            "images: {} ({}, {})",
            enabled(credentials.image_api_key.is_some()),
            config.image.model,
            config.image.size
        ),
        format!("search: {}", enabled(credentials.search_api_key.is_some())),
        format!(
            "retry:  {} attempts, up to {}s of backoff",
            config.retry.max_attempts,
            carousel_core::llm::RetryPolicy::from(&config.retry)
                .worst_case_wait()
                .as_secs()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_writes_loadable_defaults_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let init = |force| ConfigArgs {
            command: ConfigCommand::Init { force },
        };

        execute(init(false), Some(path_str)).await.unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.retry.max_attempts, 3);

        assert!(execute(init(false), Some(path_str)).await.is_err());
        execute(init(true), Some(path_str)).await.unwrap();
    }

    #[test]
    fn test_service_summary_reflects_resolved_keys() {
        let mut config = Config::default();
        config.search.enabled = true;
        let keys = |name: &str| match name {
            "OPENAI_API_KEY" | "TAVILY_API_KEY" => Some("k".to_string()),
            _ => None,
        };
        let credentials = Credentials::resolve_from(&config, keys).unwrap();

        let lines = service_summary(&config, &credentials);
        assert_eq!(lines[0], "text:   openai (gpt-4o)");
        assert!(lines[1].starts_with("images: enabled (dall-e-3"));
        assert_eq!(lines[2], "search: enabled");
        assert_eq!(lines[3], "retry:  3 attempts, up to 300s of backoff");
    }

    #[test]
    fn test_check_fails_without_keys() {
        let config = Config::default();
        assert!(Credentials::resolve_from(&config, |_: &str| None).is_err());
    }
}
