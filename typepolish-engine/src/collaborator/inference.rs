//! Hosted text-to-text inference endpoint used for paraphrasing

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use typepolish_core::{capitalize_and_punctuate, normalize};

use super::Generator;
use crate::config::GenerationConfig;
use crate::error::ServiceError;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    num_beams: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct Generated {
    generated_text: String,
}

/// Shapes the endpoint is known to answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generated>),
    Single(Generated),
    Error { error: String },
}

/// Generator calling an inference endpoint with a bearer token
pub struct InferenceGenerator {
    client: Client,
    endpoint: String,
    token: String,
    parameters: GenerationParameters,
}

impl std::fmt::Debug for InferenceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceGenerator")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl InferenceGenerator {
    /// Build from configuration, reading the token from the configured
    /// environment variable.
    pub fn from_env(config: &GenerationConfig) -> Result<Self, ServiceError> {
        let token = std::env::var(&config.token_env).unwrap_or_default();
        Self::new(config, token)
    }

    /// Build with an explicit token. A missing token or a disabled service
    /// is a permanent failure.
    pub fn new(config: &GenerationConfig, token: impl Into<String>) -> Result<Self, ServiceError> {
        if !config.enabled {
            return Err(ServiceError::NotConfigured("generation disabled".to_string()));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ServiceError::NotConfigured(format!(
                "{} is not set",
                config.token_env
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ServiceError::ClientInit(e.to_string()))?;

        tracing::debug!(endpoint = %config.endpoint, "inference client ready");
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token,
            parameters: GenerationParameters {
                max_new_tokens: config.max_new_tokens,
                num_beams: config.num_beams,
                do_sample: false,
            },
        })
    }
}

impl Generator for InferenceGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: self.parameters,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ServiceError::from_status(status.as_u16(), &body));
        }

        parse_generation(&body)
    }
}

/// Extract and clean the generated text from a response body
fn parse_generation(body: &str) -> Result<String, ServiceError> {
    let response: GenerationResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

    let raw = match response {
        GenerationResponse::Batch(items) => items
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| ServiceError::MalformedResponse("empty result list".to_string()))?,
        GenerationResponse::Single(g) => g.generated_text,
        GenerationResponse::Error { error } => return Err(ServiceError::Unavailable(error)),
    };

    let cleaned = capitalize_and_punctuate(&normalize(&raw));
    if cleaned.is_empty() {
        return Err(ServiceError::MalformedResponse(
            "empty generated text".to_string(),
        ));
    }
    Ok(cleaned)
}
