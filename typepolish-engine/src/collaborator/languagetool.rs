//! LanguageTool HTTP grammar checker

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::GrammarChecker;
use crate::config::GrammarConfig;
use crate::error::ServiceError;

/// One issue reported by the checker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarMatch {
    /// Start of the flagged span, in UTF-16 code units
    pub offset: usize,
    /// Length of the flagged span, in UTF-16 code units
    pub length: usize,
    /// Suggested replacements, best first
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

/// A suggested replacement for a [`GrammarMatch`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    /// Replacement text
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<GrammarMatch>,
}

/// Grammar checker backed by a LanguageTool `/v2/check` endpoint
#[derive(Debug, Clone)]
pub struct LanguageToolChecker {
    client: Client,
    endpoint: String,
    language: String,
}

impl LanguageToolChecker {
    /// Build the HTTP client. Fails permanently when the checker is disabled
    /// or the client cannot be constructed.
    pub fn new(config: &GrammarConfig) -> Result<Self, ServiceError> {
        if !config.enabled {
            return Err(ServiceError::NotConfigured(
                "grammar checking disabled".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ServiceError::ClientInit(e.to_string()))?;

        tracing::debug!(endpoint = %config.endpoint, language = %config.language, "LanguageTool client ready");
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
        })
    }
}

impl GrammarChecker for LanguageToolChecker {
    fn check_and_correct(&self, text: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ServiceError::from_status(status.as_u16(), &body));
        }

        let parsed: CheckResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        tracing::debug!(matches = parsed.matches.len(), "LanguageTool check complete");

        Ok(apply_matches(text, &parsed.matches))
    }
}

/// Apply the first replacement of every match and trim the result.
///
/// Offsets are UTF-16 code units, as reported by the service. Matches are
/// applied from the end of the text backwards so earlier offsets stay
/// valid. Matches without replacements, matches past the end of the text,
/// matches splitting a surrogate pair and matches overlapping an already
/// applied one are skipped.
pub fn apply_matches(text: &str, matches: &[GrammarMatch]) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    // UTF-16 position of every char boundary, end of text included
    let boundaries: Vec<usize> = std::iter::once(0)
        .chain(chars.iter().scan(0, |pos, c| {
            *pos += c.len_utf16();
            Some(*pos)
        }))
        .collect();
    let char_index = |utf16: usize| boundaries.binary_search(&utf16).ok();

    let mut ordered: Vec<&GrammarMatch> = matches.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut applied_from = usize::MAX;
    for m in ordered {
        let Some(replacement) = m.replacements.first() else {
            continue;
        };
        let span = char_index(m.offset).zip(char_index(m.offset.saturating_add(m.length)));
        let Some((start, end)) = span.filter(|&(_, end)| end <= applied_from) else {
            tracing::trace!(offset = m.offset, length = m.length, "skipped grammar match");
            continue;
        };
        chars.splice(start..end, replacement.value.chars());
        applied_from = start;
    }

    chars.into_iter().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(offset: usize, length: usize, value: &str) -> GrammarMatch {
        GrammarMatch {
            offset,
            length,
            replacements: vec![Replacement {
                value: value.to_string(),
            }],
        }
    }

    #[test]
    fn test_apply_single_match() {
        assert_eq!(apply_matches("he go home", &[m(3, 2, "goes")]), "he goes home");
    }

    #[test]
    fn test_apply_in_any_order() {
        let matches = [m(0, 2, "He"), m(3, 2, "goes")];
        assert_eq!(apply_matches("he go home", &matches), "He goes home");
        let reversed = [m(3, 2, "goes"), m(0, 2, "He")];
        assert_eq!(apply_matches("he go home", &reversed), "He goes home");
    }

    #[test]
    fn test_character_offsets() {
        // "é" is two bytes but one character
        assert_eq!(apply_matches("café iz nice", &[m(5, 2, "is")]), "café is nice");
    }

    #[test]
    fn test_utf16_offsets_after_astral_char() {
        // the emoji is one char but two UTF-16 code units
        assert_eq!(apply_matches("😀 he go home", &[m(6, 2, "goes")]), "😀 he goes home");
        assert_eq!(
            apply_matches("😀😀 i iz", &[m(5, 1, "I"), m(7, 2, "am")]),
            "😀😀 I am"
        );
    }

    #[test]
    fn test_match_inside_surrogate_pair_skipped() {
        assert_eq!(apply_matches("😀 ok", &[m(1, 2, "x")]), "😀 ok");
    }

    #[test]
    fn test_skips_unusable_matches() {
        let no_suggestion = GrammarMatch {
            offset: 0,
            length: 2,
            replacements: vec![],
        };
        let out_of_range = m(40, 3, "x");
        assert_eq!(
            apply_matches("he go", &[no_suggestion, out_of_range]),
            "he go"
        );
    }

    #[test]
    fn test_overlapping_match_skipped() {
        let matches = [m(3, 2, "went"), m(0, 5, "She")];
        assert_eq!(apply_matches("he go home", &matches), "he went home");
    }

    #[test]
    fn test_result_trimmed() {
        assert_eq!(apply_matches("  fine  ", &[]), "fine");
    }

    #[test]
    fn test_parse_check_response() {
        let body = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [
                {"message": "Possible typo", "offset": 3, "length": 2,
                 "replacements": [{"value": "goes"}, {"value": "went"}],
                 "rule": {"id": "X"}}
            ]
        }"#;
        let parsed: CheckResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.matches, vec![GrammarMatch {
            offset: 3,
            length: 2,
            replacements: vec![
                Replacement { value: "goes".into() },
                Replacement { value: "went".into() },
            ],
        }]);
    }

    #[test]
    fn test_disabled_checker_not_configured() {
        let config = GrammarConfig {
            enabled: false,
            ..GrammarConfig::default()
        };
        let err = LanguageToolChecker::new(&config).unwrap_err();
        assert!(err.is_permanent());
    }
}
