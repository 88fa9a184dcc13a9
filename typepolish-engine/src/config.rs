//! Engine configuration
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields a working configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use typepolish_core::{builtin_rules, RuleSet};

use crate::error::Result;

/// Environment variable holding the generation token unless overridden
pub const DEFAULT_TOKEN_ENV: &str = "TYPEPOLISH_API_TOKEN";

/// Commented configuration template written by `generate-config`
pub const CONFIG_TEMPLATE: &str = r#"# TypePolish engine configuration
#
# Every key is optional; the values below are the defaults.

# Custom rewrite rule file (TOML). The built-in English rules are used when unset.
# rules = "my-rules.toml"

[grammar]
enabled = true
endpoint = "https://api.languagetool.org/v2/check"
language = "en-US"
timeout_secs = 10
connect_timeout_secs = 5

[generation]
enabled = true
endpoint = "https://api-inference.huggingface.co/models/t5-base"
# Name of the environment variable holding the API token
token_env = "TYPEPOLISH_API_TOKEN"
timeout_secs = 30
connect_timeout_secs = 5
max_new_tokens = 160
num_beams = 5

[pipeline]
# "remote" calls the generation service, "local" uses the rule-based rewrite only
generation = "remote"
# Text returned when generation fails: "corrected" or "rewritten"
fallback = "rewritten"
"#;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grammar checking service
    pub grammar: GrammarConfig,
    /// Paraphrase generation service
    pub generation: GenerationConfig,
    /// Pipeline behaviour
    pub pipeline: PipelineConfig,
    /// Optional custom rule file
    pub rules: Option<PathBuf>,
}

/// Grammar checking service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Call the service at all
    pub enabled: bool,
    /// LanguageTool check endpoint
    pub endpoint: String,
    /// Language code sent with each request
    pub language: String,
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// Connection timeout
    pub connect_timeout_secs: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.languagetool.org/v2/check".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Call the service at all
    pub enabled: bool,
    /// Inference endpoint
    pub endpoint: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// Connection timeout
    pub connect_timeout_secs: u64,
    /// Generation length limit
    pub max_new_tokens: u32,
    /// Beam search width
    pub num_beams: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api-inference.huggingface.co/models/t5-base".to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
            max_new_tokens: 160,
            num_beams: 5,
        }
    }
}

/// Where `/polish-ai` gets its rewritten text from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Call the generation service
    #[default]
    Remote,
    /// Rule-based rewrite only, no service call
    Local,
}

/// Text returned by `/polish-ai` when generation fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackText {
    /// The grammar-corrected text, without phrase rewriting
    Corrected,
    /// Phrase rewrite plus tone and style
    #[default]
    Rewritten,
}

/// Pipeline behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Generation source
    pub generation: GenerationMode,
    /// Fallback when generation fails
    pub fallback: FallbackText,
}

impl EngineConfig {
    /// Parse configuration from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a file. A relative `rules` path is resolved
    /// against the directory of the config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let (Some(rules), Some(dir)) = (config.rules.as_mut(), path.parent()) {
            if rules.is_relative() {
                *rules = dir.join(&*rules);
            }
        }

        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Disable both external services
    pub fn offline(mut self) -> Self {
        self.grammar.enabled = false;
        self.generation.enabled = false;
        self.pipeline.generation = GenerationMode::Local;
        self
    }

    /// Rule set named by `rules`, or the built-in English rules
    pub fn load_rules(&self) -> Result<Arc<RuleSet>> {
        match &self.rules {
            Some(path) => Ok(Arc::new(RuleSet::from_file(path)?)),
            None => Ok(builtin_rules()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_template_matches_defaults() {
        let config = EngineConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
[generation]
token_env = "MY_TOKEN"

[pipeline]
fallback = "corrected"
"#,
        )
        .unwrap();
        assert_eq!(config.generation.token_env, "MY_TOKEN");
        assert_eq!(config.generation.num_beams, 5);
        assert_eq!(config.pipeline.fallback, FallbackText::Corrected);
        assert_eq!(config.pipeline.generation, GenerationMode::Remote);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = EngineConfig::from_toml_str("[pipeline]\ngeneration = \"cloud\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_offline() {
        let config = EngineConfig::default().offline();
        assert!(!config.grammar.enabled);
        assert!(!config.generation.enabled);
        assert_eq!(config.pipeline.generation, GenerationMode::Local);
    }

    #[test]
    fn test_relative_rules_path_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("typepolish.toml");
        std::fs::write(&config_path, "rules = \"rules.toml\"\n").unwrap();
        std::fs::write(
            dir.path().join("rules.toml"),
            "[metadata]\ncode = \"x\"\nname = \"X\"\n",
        )
        .unwrap();

        let config = EngineConfig::from_file(&config_path).unwrap();
        assert_eq!(config.rules.as_deref(), Some(dir.path().join("rules.toml").as_path()));
        assert_eq!(config.load_rules().unwrap().code(), "x");
    }

    #[test]
    fn test_default_rules_are_builtin() {
        assert_eq!(EngineConfig::default().load_rules().unwrap().code(), "en");
    }

    #[test]
    fn test_missing_rule_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rules = \"/nonexistent/rules.toml\"").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.load_rules(), Err(EngineError::Core(_))));
    }
}
