//! Sentence-level phrase rewriting
//!
//! Each sentence passes through the rule tables exactly once, in a fixed
//! order. A rule sees the output of the rules before it; nothing is
//! re-matched after the connector stage.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::rules::{builtin_rules, RuleSet};
use crate::text::{join, normalize, segment};

static STANDALONE_I: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bi\b").expect("standalone-i pattern is valid"));

/// Applies the weak-phrase, phrasing and connector tables to sentences
#[derive(Debug, Clone)]
pub struct PhraseRewriter {
    rules: Arc<RuleSet>,
}

impl Default for PhraseRewriter {
    fn default() -> Self {
        Self::new(builtin_rules())
    }
}

impl PhraseRewriter {
    /// Create a rewriter over the given rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Rule set in use
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Rewrite a single sentence.
    ///
    /// 1. collapse whitespace
    /// 2. standalone `i` → `I`
    /// 3. weak-phrase table
    /// 4. phrasing table
    /// 5. first matching sentence-initial connector
    pub fn rewrite(&self, sentence: &str) -> String {
        let normalized = normalize(sentence);
        let mut current = STANDALONE_I.replace_all(&normalized, "I").into_owned();

        for rule in self.rules.weak_phrases().iter().chain(self.rules.phrasing()) {
            if let Some(next) = rule.apply(&current) {
                tracing::trace!(pattern = rule.pattern(), "rewrite rule applied");
                current = next;
            }
        }

        for rule in self.rules.connectors() {
            if let Some(next) = rule.apply(&current) {
                tracing::trace!(pattern = rule.pattern(), "connector rewritten");
                current = next;
                break;
            }
        }

        current
    }

    /// Normalize, segment, rewrite every sentence and rejoin, dropping any
    /// sentence identical to the previous kept one.
    pub fn rewrite_text(&self, text: &str) -> String {
        let normalized = normalize(text);
        let sentences = segment(&normalized);
        let mut kept: Vec<String> = Vec::with_capacity(sentences.len());

        for sentence in &sentences {
            let rewritten = self.rewrite(sentence.as_str());
            if rewritten.is_empty() || kept.last() == Some(&rewritten) {
                tracing::trace!(sentence = sentence.as_str(), "dropped sentence");
                continue;
            }
            kept.push(rewritten);
        }

        tracing::debug!(
            input_sentences = sentences.len(),
            output_sentences = kept.len(),
            "rewrote text"
        );
        join(&kept)
    }
}
