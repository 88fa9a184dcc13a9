//! Runtime rule tables
//!
//! Built once from a [`RuleConfig`] and shared read-only afterwards.

use std::collections::HashMap;

use super::config::{ProfileConfig, RuleConfig, RuleEntry, StepConfig};
use crate::error::{CoreError, Result};
use crate::profile::{CorrectionMode, Style, Tone};
use crate::text::{capitalize_first, ends_with_terminator, is_terminator};

/// Where a rewrite rule is allowed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Case-insensitive prefix of the sentence, ignoring leading whitespace
    SentenceStart,
    /// Case-sensitive substring anywhere in the sentence
    Anywhere,
}

/// A literal pattern → replacement rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pattern: String,
    replacement: String,
    scope: RuleScope,
}

impl RewriteRule {
    /// Rule replacing every occurrence of `pattern`
    pub fn anywhere(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            scope: RuleScope::Anywhere,
        }
    }

    /// Rule replacing `pattern` only when it opens the sentence
    pub fn sentence_start(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            scope: RuleScope::SentenceStart,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn scope(&self) -> RuleScope {
        self.scope
    }

    /// Apply the rule, returning `None` when it does not match.
    pub fn apply(&self, text: &str) -> Option<String> {
        if self.pattern.is_empty() {
            return None;
        }
        match self.scope {
            RuleScope::Anywhere => text
                .contains(&self.pattern)
                .then(|| text.replace(&self.pattern, &self.replacement)),
            RuleScope::SentenceStart => {
                let trimmed = text.trim_start();
                let head = trimmed.get(..self.pattern.len())?;
                if !head.eq_ignore_ascii_case(&self.pattern) {
                    return None;
                }
                let mut result = String::with_capacity(text.len() + self.replacement.len());
                result.push_str(&self.replacement);
                result.push_str(&trimmed[self.pattern.len()..]);
                Some(result)
            }
        }
    }
}

/// Condition evaluated against the current text before inserting a prefix
/// or suffix. Needles are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guard {
    when_contains: Vec<String>,
    unless_contains: Vec<String>,
}

impl Guard {
    pub fn new(when_contains: Vec<String>, unless_contains: Vec<String>) -> Self {
        let lower = |v: Vec<String>| -> Vec<String> {
            v.into_iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            when_contains: lower(when_contains),
            unless_contains: lower(unless_contains),
        }
    }

    /// `true` when every `unless` needle is absent and, if any `when`
    /// needles exist, at least one is present.
    pub fn allows(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        let blocked = self
            .unless_contains
            .iter()
            .any(|needle| haystack.contains(needle.as_str()));
        let wanted = self.when_contains.is_empty()
            || self
                .when_contains
                .iter()
                .any(|needle| haystack.contains(needle.as_str()));
        !blocked && wanted
    }
}

/// One transformation inside a tone, style or mode profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Plain substring replacement
    Replace { from: String, to: String },
    /// Insert text before the current text
    Prefix { text: String, guard: Guard },
    /// Append text after the current text
    Suffix { text: String, guard: Guard },
}

impl Transform {
    /// Apply the transformation. Empty input is never extended.
    pub fn apply(&self, current: &str) -> String {
        match self {
            Transform::Replace { from, to } => {
                if from.is_empty() {
                    current.to_string()
                } else {
                    current.replace(from.as_str(), to)
                }
            }
            Transform::Prefix { text, guard } => {
                if current.is_empty() || !guard.allows(current) {
                    return current.to_string();
                }
                // A prefix that closes its own sentence starts a new one
                let body = if text.trim_end().chars().last().is_some_and(is_terminator) {
                    capitalize_first(current)
                } else {
                    current.to_string()
                };
                format!("{text}{body}")
            }
            Transform::Suffix { text, guard } => {
                if current.is_empty() || !guard.allows(current) {
                    return current.to_string();
                }
                let mut result = current.to_string();
                if !ends_with_terminator(&result) {
                    result.push('.');
                }
                result.push_str(text);
                result
            }
        }
    }
}

impl From<StepConfig> for Transform {
    fn from(step: StepConfig) -> Self {
        match step {
            StepConfig::Replace { from, to } => Transform::Replace { from, to },
            StepConfig::Prefix {
                text,
                when_contains,
                unless_contains,
            } => Transform::Prefix {
                text,
                guard: Guard::new(when_contains, unless_contains),
            },
            StepConfig::Suffix {
                text,
                when_contains,
                unless_contains,
            } => Transform::Suffix {
                text,
                guard: Guard::new(when_contains, unless_contains),
            },
        }
    }
}

/// Ordered transformations plus an optional prompt instruction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    instruction: Option<String>,
    steps: Vec<Transform>,
}

impl Profile {
    pub fn new(instruction: Option<String>, steps: Vec<Transform>) -> Self {
        Self { instruction, steps }
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    /// Run every step in order
    pub fn apply(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |current, step| step.apply(&current))
    }
}

impl From<ProfileConfig> for Profile {
    fn from(config: ProfileConfig) -> Self {
        Self {
            instruction: config.instruction,
            steps: config.steps.into_iter().map(Transform::from).collect(),
        }
    }
}

/// The complete, immutable set of rewrite tables
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    code: String,
    name: String,
    weak_phrases: Vec<RewriteRule>,
    phrasing: Vec<RewriteRule>,
    connectors: Vec<RewriteRule>,
    modes: HashMap<CorrectionMode, Profile>,
    tones: HashMap<Tone, Profile>,
    styles: HashMap<Style, Profile>,
}

impl RuleSet {
    /// A rule set with no rules; every stage becomes a no-op
    pub fn empty() -> Self {
        Self {
            code: "none".to_string(),
            name: "Empty".to_string(),
            ..Default::default()
        }
    }

    /// Build runtime tables from a validated configuration
    pub fn from_config(config: RuleConfig) -> Result<Self> {
        config.validate().map_err(CoreError::InvalidRules)?;

        let anywhere = |entries: Vec<RuleEntry>| -> Vec<RewriteRule> {
            entries
                .into_iter()
                .map(|e| RewriteRule::anywhere(e.pattern, e.replacement))
                .collect()
        };

        let connectors = config
            .connectors
            .into_iter()
            .map(|e| RewriteRule::sentence_start(e.pattern, e.replacement))
            .collect();

        // Keys were checked by validate()
        let modes = config
            .modes
            .into_iter()
            .filter_map(|(k, v)| CorrectionMode::from_key(&k).map(|m| (m, Profile::from(v))))
            .collect();
        let tones = config
            .tones
            .into_iter()
            .filter_map(|(k, v)| Tone::from_key(&k).map(|t| (t, Profile::from(v))))
            .collect();
        let styles = config
            .styles
            .into_iter()
            .filter_map(|(k, v)| Style::from_key(&k).map(|s| (s, Profile::from(v))))
            .collect();

        Ok(Self {
            code: config.metadata.code,
            name: config.metadata.name,
            weak_phrases: anywhere(config.weak_phrases),
            phrasing: anywhere(config.phrasing),
            connectors,
            modes,
            tones,
            styles,
        })
    }

    /// Rule set code from the metadata table
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable rule set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hedging removals, in application order
    pub fn weak_phrases(&self) -> &[RewriteRule] {
        &self.weak_phrases
    }

    /// Idiom smoothing rules, in application order
    pub fn phrasing(&self) -> &[RewriteRule] {
        &self.phrasing
    }

    /// Sentence-initial connector rules, in priority order
    pub fn connectors(&self) -> &[RewriteRule] {
        &self.connectors
    }

    pub fn mode(&self, mode: CorrectionMode) -> Option<&Profile> {
        self.modes.get(&mode)
    }

    pub fn tone(&self, tone: Tone) -> Option<&Profile> {
        self.tones.get(&tone)
    }

    pub fn style(&self, style: Style) -> Option<&Profile> {
        self.styles.get(&style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anywhere_replaces_all() {
        let rule = RewriteRule::anywhere("very very", "very");
        assert_eq!(
            rule.apply("very very good and very very fast").as_deref(),
            Some("very good and very fast")
        );
        assert_eq!(rule.apply("good"), None);
    }

    #[test]
    fn test_anywhere_is_case_sensitive() {
        let rule = RewriteRule::anywhere("maybe ", "");
        assert_eq!(rule.apply("Maybe later"), None);
    }

    #[test]
    fn test_anywhere_matches_inside_words() {
        let rule = RewriteRule::anywhere("sir", "bro");
        assert_eq!(rule.apply("I desire tea").as_deref(), Some("I debroe tea"));
    }

    #[test]
    fn test_sentence_start_case_insensitive() {
        let rule = RewriteRule::sentence_start("but ", "However, ");
        assert_eq!(
            rule.apply("BUT later I saw it.").as_deref(),
            Some("However, later I saw it.")
        );
        assert_eq!(
            rule.apply("  but it works").as_deref(),
            Some("However, it works")
        );
        assert_eq!(rule.apply("Butter is good."), None);
        assert_eq!(rule.apply("It is, but not now."), None);
    }

    #[test]
    fn test_sentence_start_on_short_and_multibyte_text() {
        let rule = RewriteRule::sentence_start("so ", "As a result, ");
        assert_eq!(rule.apply("so"), None);
        assert_eq!(rule.apply("sé bien"), None);
        assert_eq!(rule.apply(""), None);
    }

    #[test]
    fn test_guard() {
        let guard = Guard::new(vec!["late".into()], vec!["Sorry".into()]);
        assert!(guard.allows("I am late."));
        assert!(!guard.allows("Sorry, I am LATE."));
        assert!(!guard.allows("I am early."));
        assert!(Guard::default().allows("anything"));
    }

    #[test]
    fn test_suffix_adds_terminator() {
        let step = Transform::Suffix {
            text: " Thanks.".into(),
            guard: Guard::default(),
        };
        assert_eq!(step.apply("see you"), "see you. Thanks.");
        assert_eq!(step.apply("see you!"), "see you! Thanks.");
        assert_eq!(step.apply(""), "");
    }

    #[test]
    fn test_prefix_capitalizes_new_sentence() {
        let step = Transform::Prefix {
            text: "Hello. ".into(),
            guard: Guard::default(),
        };
        assert_eq!(step.apply("it is late."), "Hello. It is late.");

        let clause = Transform::Prefix {
            text: "Honestly, ".into(),
            guard: Guard::default(),
        };
        assert_eq!(clause.apply("it is late."), "Honestly, it is late.");
    }

    #[test]
    fn test_profile_applies_in_order() {
        let profile = Profile::new(
            None,
            vec![
                Transform::Replace {
                    from: "a".into(),
                    to: "b".into(),
                },
                Transform::Replace {
                    from: "b".into(),
                    to: "c".into(),
                },
            ],
        );
        assert_eq!(profile.apply("a"), "c");
    }

    #[test]
    fn test_empty_rule_set() {
        let rules = RuleSet::empty();
        assert!(rules.weak_phrases().is_empty());
        assert!(rules.tone(Tone::Friendly).is_none());
    }
}
