//! Error types for carousel generation.
//!
//! Errors are split by concern: configuration problems are fatal at startup,
//! remote errors come back from hosted AI services, and `CarouselError` wraps
//! both for callers that drive a whole generation.

use thiserror::Error;

/// Top-level error type for carousel operations.
#[derive(Error, Debug)]
pub enum CarouselError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A hosted service rejected or failed a request
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The user-supplied request is unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A required credential could not be resolved
    #[error("Missing credential {name}. {hint}")]
    MissingCredential { name: String, hint: String },
}

/// Failures reported by a hosted text, image, or search service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The service rejected the call because the request quota was exceeded.
    #[error("{service} rate limit exceeded: {message}")]
    RateLimited { service: String, message: String },

    /// Any other failure: transport, non-2xx status, or an unusable body.
    #[error("{service} request failed: {message}")]
    Request {
        service: String,
        message: String,
        status_code: Option<u16>,
    },
}

impl RemoteError {
    /// Build a non-rate-limit error without an HTTP status.
    pub fn request(service: &str, message: impl Into<String>) -> Self {
        Self::Request {
            service: service.to_string(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Classify a non-success HTTP status. 429 is the only rate-limit signal.
    pub fn from_status(service: &str, status: u16, body: &str) -> Self {
        if status == 429 {
            Self::RateLimited {
                service: service.to_string(),
                message: format!("HTTP 429: {body}"),
            }
        } else {
            Self::Request {
                service: service.to_string(),
                message: format!("HTTP {status}: {body}"),
                status_code: Some(status),
            }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Name of the service that produced the error.
    pub fn service(&self) -> &str {
        match self {
            Self::RateLimited { service, .. } | Self::Request { service, .. } => service,
        }
    }
}

/// Read a response body, classifying the status first.
///
/// On a non-2xx status the body is only context for the error, so a read
/// failure there is ignored. On success an unreadable body is an error.
pub(crate) fn checked_body<E: std::fmt::Display>(
    service: &str,
    status: u16,
    body: std::result::Result<String, E>,
) -> RemoteResult<String> {
    if !(200..300).contains(&status) {
        return Err(RemoteError::from_status(
            service,
            status,
            &body.unwrap_or_default(),
        ));
    }
    body.map_err(|e| RemoteError::request(service, format!("Failed to read response: {e}")))
}

/// Convenience type alias for carousel results.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Convenience type alias for results of a single remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
