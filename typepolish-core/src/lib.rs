//! Rule-based text rewriting for TypePolish
//!
//! This crate holds the deterministic part of the rewriting pipeline. It
//! never talks to the network; grammar checking and model generation live in
//! `typepolish-engine`.
//!
//! # Stages
//!
//! - **Normalization**: whitespace collapsing, capitalization, terminal punctuation
//! - **Segmentation**: splitting text after `.`, `!` or `?`
//! - **Phrase rewriting**: weak-phrase, phrasing and connector tables
//! - **Tone and style**: profile transformations selected by [`Tone`] and [`Style`]
//!
//! All tables are data, loaded from TOML into a [`RuleSet`]. The built-in
//! English rules are embedded in the binary.
//!
//! # Example
//!
//! ```rust
//! use typepolish_core::{PhraseRewriter, Style, Tone, ToneStyleApplier};
//!
//! let rewriter = PhraseRewriter::default();
//! let text = rewriter.rewrite_text("Go now. Go now. But later i left.");
//! assert_eq!(text, "Go now. However, later I left.");
//!
//! let applier = ToneStyleApplier::default();
//! let polished = applier.apply(&text, Tone::Calm, Style::Neutral);
//! assert_eq!(polished, "Go now. However, later I left. No rush.");
//! ```

pub mod error;
pub mod profile;
pub mod prompt;
pub mod rewrite;
pub mod rules;
pub mod text;
pub mod tone;

pub use error::{CoreError, Result};
pub use profile::{CorrectionMode, Style, Tone};
pub use prompt::build_prompt;
pub use rewrite::PhraseRewriter;
pub use rules::{builtin_rules, RuleSet};
pub use text::{capitalize_and_punctuate, normalize, segment, Sentence};
pub use tone::ToneStyleApplier;
