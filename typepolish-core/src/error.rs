//! Core error types (rule loading only)
//!
//! The text algorithms themselves are total; the only fallible operation in
//! this crate is turning a TOML rule file into a [`RuleSet`](crate::RuleSet).

use thiserror::Error;

/// Errors raised while loading or validating rule tables
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rule file could not be parsed as TOML
    #[error("failed to parse rule file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Rule file parsed but failed validation
    #[error("invalid rule set: {0}")]
    InvalidRules(String),

    /// Rule file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
