//! Rewrite orchestration for TypePolish
//!
//! This crate wires the deterministic stages of `typepolish-core` to the
//! external grammar and generation services. Collaborator failures never
//! escape a pipeline operation: they are logged, replaced by fallback text
//! and reported through [`Report::degraded`] and the summary string.
//!
//! # Example
//!
//! ```rust
//! use typepolish_engine::{RewritePipeline, Tone, Style};
//!
//! let pipeline = RewritePipeline::offline();
//! let report = pipeline.polish("but later i saw it", Tone::Neutral, Style::Neutral);
//! assert_eq!(report.text, "However, later I saw it.");
//! ```

#![warn(missing_docs)]

pub mod collaborator;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod summary;

pub use collaborator::{ClientHandle, Generator, GrammarChecker, HandleState, Outcome};
pub use config::{EngineConfig, FallbackText, GenerationMode, PipelineConfig};
pub use error::{EngineError, Result, ServiceError};
pub use pipeline::{Report, RewritePipeline, RewritePipelineBuilder};

// Re-export from core for convenience
pub use typepolish_core::{CorrectionMode, RuleSet, Sentence, Style, Tone};
