//! Human-readable change summaries
//!
//! Every degraded variant starts with [`DEGRADED_PREFIX`] and names the
//! service that failed.

use typepolish_core::{CorrectionMode, Style, Tone};

use crate::config::FallbackText;

/// Summary returned for empty or whitespace-only input
pub const NO_TEXT: &str = "No text provided.";

/// Marker opening every degraded-mode summary
pub const DEGRADED_PREFIX: &str = "Degraded mode:";

/// Name of the grammar service in summaries
pub const GRAMMAR_SERVICE: &str = "LanguageTool";

/// Name of the generation service in summaries
pub const GENERATION_SERVICE: &str = "the paraphrase service";

/// How `/polish-ai` produced its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolishSource {
    /// Generation service answered
    Generated,
    /// Rule-based rewrite was configured
    Local,
    /// Generation failed and the configured fallback was used
    Fallback(FallbackText),
}

pub(crate) fn correct(mode: CorrectionMode, grammar_ok: bool) -> String {
    if grammar_ok {
        format!("Grammar and spelling corrected using {GRAMMAR_SERVICE} with {mode} style.")
    } else {
        format!(
            "{DEGRADED_PREFIX} {GRAMMAR_SERVICE} was unavailable, so only formatting and \
             {mode} style adjustments were applied."
        )
    }
}

pub(crate) fn polish(tone: Tone, style: Style, source: PolishSource, grammar_ok: bool) -> String {
    let (tone, style) = (tone.label(), style.label());
    let summary = match source {
        PolishSource::Generated => format!(
            "Expression adjusted using Smart Rewrite v3 with '{tone}' tone and '{style}' writing style."
        ),
        PolishSource::Local => format!(
            "Expression adjusted using rule-based Smart Rewrite with '{tone}' tone and '{style}' writing style."
        ),
        PolishSource::Fallback(FallbackText::Rewritten) => format!(
            "{DEGRADED_PREFIX} {GENERATION_SERVICE} was unavailable, so the expression was \
             adjusted using rule-based rewriting with '{tone}' tone and '{style}' writing style."
        ),
        PolishSource::Fallback(FallbackText::Corrected) => {
            let returned = if grammar_ok { "grammar-corrected" } else { "normalized" };
            format!(
                "{DEGRADED_PREFIX} {GENERATION_SERVICE} was unavailable, so the {returned} \
                 text was returned without '{tone}' tone or '{style}' writing style."
            )
        }
    };
    with_grammar_note(summary, grammar_ok)
}

pub(crate) fn rewrite_tone(tone: Tone, grammar_ok: bool) -> String {
    let summary = format!("Tone adjusted to '{}' using rule-based rewriting.", tone.label());
    with_grammar_note(summary, grammar_ok)
}

fn with_grammar_note(summary: String, grammar_ok: bool) -> String {
    if grammar_ok {
        return summary;
    }
    let note = format!("{GRAMMAR_SERVICE} was unavailable, so grammar was not checked.");
    if summary.starts_with(DEGRADED_PREFIX) {
        format!("{summary} {note}")
    } else {
        format!("{summary} {DEGRADED_PREFIX} {note}")
    }
}

/// Whether a summary reports degraded mode
pub fn is_degraded(summary: &str) -> bool {
    summary.contains(DEGRADED_PREFIX)
}
