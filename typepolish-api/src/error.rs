//! API error types

use thiserror::Error;
use typepolish_engine::EngineError;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body is not valid JSON for the route
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No handler for the route
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    /// Engine construction error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Response serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status a routing layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::UnknownRoute(_) => 404,
            ApiError::Engine(_) | ApiError::Serde(_) => 500,
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
