//! External collaborators
//!
//! The pipeline only sees the [`GrammarChecker`] and [`Generator`] traits.
//! Each implementation is the single place allowed to interpret the raw
//! payloads of its service; everything it returns is either corrected text
//! or a typed [`ServiceError`].

mod handle;
pub mod inference;
pub mod languagetool;

pub use handle::{ClientHandle, HandleState};
pub use inference::InferenceGenerator;
pub use languagetool::{apply_matches, GrammarMatch, LanguageToolChecker};

use crate::error::ServiceError;

/// Grammar and spelling correction service
pub trait GrammarChecker: Send + Sync {
    /// Return `text` with the service's corrections applied
    fn check_and_correct(&self, text: &str) -> Result<String, ServiceError>;
}

/// Paraphrase/generation service
pub trait Generator: Send + Sync {
    /// Generate text for an instruction prompt
    fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

impl<F> GrammarChecker for F
where
    F: Fn(&str) -> Result<String, ServiceError> + Send + Sync,
{
    fn check_and_correct(&self, text: &str) -> Result<String, ServiceError> {
        self(text)
    }
}

impl<F> Generator for F
where
    F: Fn(&str) -> Result<String, ServiceError> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self(prompt)
    }
}

/// Result of one collaborator call, as seen by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service produced text
    Success(String),
    /// The call failed; the pipeline falls back
    Failure(ServiceError),
}

impl Outcome {
    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Text on success, `fallback` otherwise, plus the success flag
    pub fn or_fallback(self, fallback: &str) -> (String, bool) {
        match self {
            Outcome::Success(text) => (text, true),
            Outcome::Failure(_) => (fallback.to_string(), false),
        }
    }
}

impl From<Result<String, ServiceError>> for Outcome {
    fn from(result: Result<String, ServiceError>) -> Self {
        match result {
            Ok(text) => Outcome::Success(text),
            Err(err) => Outcome::Failure(err),
        }
    }
}
