//! Tone, style and correction-mode adjustment
//!
//! Profiles come from the active [`RuleSet`]. A profile the rule set does
//! not define leaves the text unchanged.

use std::sync::Arc;

use crate::profile::{CorrectionMode, Style, Tone};
use crate::rules::{builtin_rules, Profile, RuleSet};

/// Applies tone, style and mode profiles to already rewritten text
#[derive(Debug, Clone)]
pub struct ToneStyleApplier {
    rules: Arc<RuleSet>,
}

impl Default for ToneStyleApplier {
    fn default() -> Self {
        Self::new(builtin_rules())
    }
}

impl ToneStyleApplier {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Apply the tone profile, then the style profile
    pub fn apply(&self, text: &str, tone: Tone, style: Style) -> String {
        let toned = self.apply_tone(text, tone);
        self.apply_style(&toned, style)
    }

    pub fn apply_tone(&self, text: &str, tone: Tone) -> String {
        run(self.rules.tone(tone), text, "tone", tone.as_str())
    }

    pub fn apply_style(&self, text: &str, style: Style) -> String {
        run(self.rules.style(style), text, "style", style.as_str())
    }

    /// Adjustment used by the grammar correction route
    pub fn apply_mode(&self, text: &str, mode: CorrectionMode) -> String {
        run(self.rules.mode(mode), text, "mode", mode.as_str())
    }
}

fn run(profile: Option<&Profile>, text: &str, kind: &str, key: &str) -> String {
    match profile {
        Some(profile) => {
            let adjusted = profile.apply(text);
            tracing::trace!(kind, key, changed = adjusted != text, "applied profile");
            adjusted
        }
        None => {
            tracing::debug!(kind, key, "no profile defined, text left unchanged");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applier() -> ToneStyleApplier {
        ToneStyleApplier::default()
    }

    #[test]
    fn test_neutral_is_identity() {
        let text = "We met yesterday.";
        assert_eq!(applier().apply(text, Tone::Neutral, Style::Neutral), text);
    }

    #[test]
    fn test_friendly_tone() {
        assert_eq!(
            applier().apply_tone("Dear Sam, the report is ready.", Tone::Friendly),
            "Hi Sam, the report is ready. Have a great day!"
        );
        // Already wished a nice day
        assert_eq!(
            applier().apply_tone("Have a nice day.", Tone::Friendly),
            "Have a nice day."
        );
    }

    #[test]
    fn test_professional_tone() {
        assert_eq!(
            applier().apply_tone("Hey Sam, we are gonna ship.", Tone::Professional),
            "Hello Sam, we are going to ship. Thank you."
        );
    }

    #[test]
    fn test_confident_tone() {
        assert_eq!(
            applier().apply_tone("I believe we might win.", Tone::Confident),
            "I know we will win."
        );
    }

    #[test]
    fn test_calm_tone() {
        assert_eq!(
            applier().apply_tone("Reply ASAP!", Tone::Calm),
            "Reply when you have a moment. No rush."
        );
    }

    #[test]
    fn test_caring_tone() {
        assert_eq!(
            applier().apply_tone("the delivery is late.", Tone::Caring),
            "I hope you are doing well. The delivery is late. I am sorry for the trouble. Please take care."
        );
        assert_eq!(
            applier().apply_tone("I hope you like it.", Tone::Caring),
            "I hope you like it. Please take care."
        );
    }

    #[test]
    fn test_persuasive_tone() {
        assert_eq!(
            applier().apply_tone("you could try it.", Tone::Persuasive),
            "you should try it. Let me know what you think."
        );
    }

    #[test]
    fn test_styles() {
        let a = applier();
        assert_eq!(
            a.apply_style("We utilize tools.", Style::Student),
            "We use tools."
        );
        assert_eq!(
            a.apply_style("Hi team, reply ASAP.", Style::Corporate),
            "Dear team, reply at your earliest convenience. Best regards."
        );
        assert_eq!(
            a.apply_style("It has a lot of big ideas.", Style::Ielts),
            "It has a considerable amount of significant ideas."
        );
        assert_eq!(
            a.apply_style("I want to see you.", Style::Romantic),
            "I would love to see you. Take care of yourself."
        );
    }

    #[test]
    fn test_tone_then_style_order() {
        // Style runs last, so its greeting wins over the tone's
        assert_eq!(
            applier().apply("Hi Sam, all done.", Tone::Friendly, Style::Corporate),
            "Dear Sam, all done. Have a great day! Best regards."
        );
    }

    #[test]
    fn test_modes() {
        let a = applier();
        assert_eq!(
            a.apply_mode("hey bro I can't come", CorrectionMode::Professional),
            "hey sir I cannot come"
        );
        assert_eq!(
            a.apply_mode("thank you sir", CorrectionMode::Casual),
            "thank you bro"
        );
        assert_eq!(
            a.apply_mode("thank you sir", CorrectionMode::Grammar),
            "thank you sir"
        );
    }

    #[test]
    fn test_missing_profile_is_noop() {
        let a = ToneStyleApplier::new(Arc::new(RuleSet::empty()));
        assert_eq!(a.apply("hey.", Tone::Caring, Style::Corporate), "hey.");
        assert_eq!(a.apply_mode("bro", CorrectionMode::Professional), "bro");
    }

    #[test]
    fn test_empty_text_never_extended() {
        assert_eq!(applier().apply("", Tone::Caring, Style::Corporate), "");
    }
}
