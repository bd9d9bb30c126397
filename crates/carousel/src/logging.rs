//! Logging setup for the CLI and the web form.
//!
//! Everything goes to stderr through `tracing`, either human-readable or as
//! JSON lines. `RUST_LOG` replaces the configured filter entirely.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// HTTP client and server internals are only interesting at trace level.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "rustls", "reqwest"];

/// Filter directive for `level`, with the HTTP stack held at `warn`.
fn directive(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    if level.eq_ignore_ascii_case("trace") {
        return level.to_string();
    }
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}

/// Install the global subscriber.
///
/// Request spans from the web form's trace layer are included in both formats.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// `--verbose` forces debug; `--json-logs` forces JSON output.
pub fn init_from_config(
    config: &carousel_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let level = if verbose_override {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let json_format = json_logs_override || config.logging.format.eq_ignore_ascii_case("json");
    init(level, json_format);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_quiets_http_stack() {
        let d = directive("debug");
        assert!(d.starts_with("debug,"));
        assert!(d.contains("hyper=warn"));
        assert!(d.contains("reqwest=warn"));
    }

    #[test]
    fn test_directive_trace_keeps_everything() {
        assert_eq!(directive("trace"), "trace");
    }

    #[test]
    fn test_directive_blank_defaults_to_info() {
        assert!(directive("  ").starts_with("info,"));
    }
}
