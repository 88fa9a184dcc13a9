//! Instruction prompt for the remote paraphrase model

use crate::profile::{Style, Tone};
use crate::rules::RuleSet;

/// Tone phrase used when the rule set has no instruction for a tone
pub const DEFAULT_TONE_INSTRUCTION: &str = "in a neutral tone";

/// Style phrase used when the rule set has no instruction for a style
pub const DEFAULT_STYLE_INSTRUCTION: &str = "with normal everyday English";

/// Build the paraphrase instruction for `text`.
///
/// The text is inserted verbatim; callers decide whether it is normalized
/// or grammar-corrected first.
pub fn build_prompt(rules: &RuleSet, text: &str, tone: Tone, style: Style) -> String {
    let tone_part = rules
        .tone(tone)
        .and_then(|p| p.instruction())
        .unwrap_or(DEFAULT_TONE_INSTRUCTION);
    let style_part = rules
        .style(style)
        .and_then(|p| p.instruction())
        .unwrap_or(DEFAULT_STYLE_INSTRUCTION);

    format!(
        "Paraphrase the following text {tone_part} and {style_part}. \
         Keep the original meaning and person the same. \
         Use natural, fluent sentences and split long sentences if needed.\n\n\
         Text: {text}"
    )
}
