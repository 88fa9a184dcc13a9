//! Rule set loader
//!
//! Manages the embedded English rules and user-supplied rule files.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::config::RuleConfig;
use super::tables::RuleSet;
use crate::error::Result;

/// Embedded English rule file
pub const BUILTIN_RULES_TOML: &str = include_str!("../../configs/rules/english.toml");

static BUILTIN: OnceLock<Arc<RuleSet>> = OnceLock::new();

/// Built-in English rules, parsed on first access and shared afterwards
pub fn builtin_rules() -> Arc<RuleSet> {
    BUILTIN
        .get_or_init(|| match RuleSet::from_toml_str(BUILTIN_RULES_TOML) {
            Ok(rules) => Arc::new(rules),
            Err(e) => {
                tracing::error!("failed to load built-in rules: {e}");
                Arc::new(RuleSet::empty())
            }
        })
        .clone()
}

impl RuleSet {
    /// Parse and validate rules from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: RuleConfig = toml::from_str(toml_str)?;
        Self::from_config(config)
    }

    /// Load rules from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let rules = Self::from_toml_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            code = rules.code(),
            "loaded rule file"
        );
        Ok(rules)
    }
}
