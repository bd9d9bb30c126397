//! Command handlers for the `carousel` binary.

pub mod config;
pub mod generate;
pub mod interactive;
pub mod serve;

use carousel_core::{Config, ConfigError};
use std::path::PathBuf;

/// Resolve the config file path: `--config` when given, else the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(Config::expand_path)
        .unwrap_or_else(Config::default_path)
}

/// Load configuration from `--config` or the default location.
///
/// An explicit path must exist; the default location falls back to defaults.
pub fn load_config(explicit: Option<&str>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => Config::load_from(&Config::expand_path(path)),
        None => Config::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_prefers_explicit() {
        assert_eq!(
            config_path(Some("/tmp/carousel.toml")),
            PathBuf::from("/tmp/carousel.toml")
        );
        assert_eq!(config_path(None), Config::default_path());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(missing.to_str().unwrap())).is_err());
    }
}
