//! JSON endpoint contract for TypePolish
//!
//! [`TextService`] implements the three rewriting routes and the health
//! route over a shared [`RewritePipeline`]. It is transport-agnostic: an
//! HTTP server only needs to forward the route and body to
//! [`TextService::handle_json`] and map [`ApiError::status_code`].

#![warn(missing_docs)]

pub mod dto;
pub mod error;

use std::str::FromStr;
use std::sync::Arc;

use typepolish_engine::{EngineConfig, RewritePipeline};

pub use dto::{CorrectRequest, HealthResponse, PolishRequest, RewriteResponse, RewriteToneRequest};
pub use error::{ApiError, Result};

/// Message returned by the health route
pub const HEALTH_MESSAGE: &str = "TypePolish backend running";

/// Routes of the JSON contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    Health,
    /// `POST /correct`
    Correct,
    /// `POST /polish-ai`
    PolishAi,
    /// `POST /rewrite-tone`
    RewriteTone,
}

impl Route {
    /// Every route
    pub const ALL: [Route; 4] = [
        Route::Health,
        Route::Correct,
        Route::PolishAi,
        Route::RewriteTone,
    ];

    /// Request path
    pub fn path(&self) -> &'static str {
        match self {
            Route::Health => "/",
            Route::Correct => "/correct",
            Route::PolishAi => "/polish-ai",
            Route::RewriteTone => "/rewrite-tone",
        }
    }

    /// HTTP method
    pub fn method(&self) -> &'static str {
        match self {
            Route::Health => "GET",
            _ => "POST",
        }
    }
}

impl FromStr for Route {
    type Err = ApiError;

    /// Accepts the path with or without the leading slash
    fn from_str(s: &str) -> Result<Self> {
        let path = s.trim().trim_start_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == path)
            .ok_or_else(|| ApiError::UnknownRoute(s.to_string()))
    }
}

/// Endpoint handlers over a shared pipeline
#[derive(Debug, Clone)]
pub struct TextService {
    pipeline: Arc<RewritePipeline>,
}

impl TextService {
    /// Wrap an existing pipeline
    pub fn new(pipeline: Arc<RewritePipeline>) -> Self {
        Self { pipeline }
    }

    /// Build the pipeline from engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(RewritePipeline::from_config(config)?)))
    }

    /// Service without external collaborators
    pub fn offline() -> Self {
        Self::new(Arc::new(RewritePipeline::offline()))
    }

    /// Underlying pipeline
    pub fn pipeline(&self) -> &RewritePipeline {
        &self.pipeline
    }

    /// `GET /`
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            message: HEALTH_MESSAGE.to_string(),
        }
    }

    /// `POST /correct`
    pub fn correct(&self, request: &CorrectRequest) -> RewriteResponse {
        if request.text.trim().is_empty() {
            return RewriteResponse::no_text();
        }
        RewriteResponse::from(self.pipeline.correct(&request.text, request.mode()))
    }

    /// `POST /polish-ai`
    pub fn polish_ai(&self, request: &PolishRequest) -> RewriteResponse {
        if request.text.trim().is_empty() {
            return RewriteResponse::no_text();
        }
        let report = self
            .pipeline
            .polish(&request.text, request.tone(), request.style());
        RewriteResponse::from(report)
    }

    /// `POST /rewrite-tone`
    pub fn rewrite_tone(&self, request: &RewriteToneRequest) -> RewriteResponse {
        if request.text.trim().is_empty() {
            return RewriteResponse::no_text();
        }
        RewriteResponse::from(self.pipeline.rewrite_tone(&request.text, request.tone()))
            .without_applied()
    }

    /// Dispatch a JSON body to `route` and serialize the response
    pub fn handle(&self, route: Route, body: &str) -> Result<String> {
        tracing::debug!(route = route.path(), bytes = body.len(), "handling request");
        let response = match route {
            Route::Health => serde_json::to_string(&self.health())?,
            Route::Correct => serde_json::to_string(&self.correct(&parse_body(body)?))?,
            Route::PolishAi => serde_json::to_string(&self.polish_ai(&parse_body(body)?))?,
            Route::RewriteTone => serde_json::to_string(&self.rewrite_tone(&parse_body(body)?))?,
        };
        Ok(response)
    }

    /// Like [`TextService::handle`], with the route given as a path
    pub fn handle_json(&self, route: &str, body: &str) -> Result<String> {
        self.handle(route.parse()?, body)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "rejected request body");
        ApiError::BadRequest(e.to_string())
    })
}
