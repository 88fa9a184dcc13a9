//! Layered error types
//!
//! [`ServiceError`] describes why a collaborator call failed and never
//! escapes a pipeline operation. [`EngineError`] covers failures while
//! building an engine (config and rule loading).

use thiserror::Error;
use typepolish_core::CoreError;

/// Longest error body kept from an HTTP failure
const MAX_BODY_CHARS: usize = 200;

/// Failure of an external collaborator call or its initialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Service is disabled or lacks credentials
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// HTTP client could not be constructed
    #[error("client initialization failed: {0}")]
    ClientInit(String),

    /// Service answered 429
    #[error("rate limited")]
    RateLimited,

    /// Request or connect timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// Service reported itself unavailable (503, model loading, ...)
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// Whether the failure will repeat on every call for this process
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ServiceError::NotConfigured(_) | ServiceError::ClientInit(_)
        )
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            429 => ServiceError::RateLimited,
            503 => ServiceError::Unavailable(truncate(body)),
            _ => ServiceError::Http {
                status,
                body: truncate(body),
            },
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::from_status(status.as_u16(), "")
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rule loading error
    #[error("rule error: {0}")]
    Core(#[from] CoreError),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
