//! Configuration structures and validation
//!
//! This module defines the TOML schema for rewrite rule files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::profile::{CorrectionMode, Style, Tone};

/// Root rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub weak_phrases: Vec<RuleEntry>,
    #[serde(default)]
    pub phrasing: Vec<RuleEntry>,
    #[serde(default)]
    pub connectors: Vec<RuleEntry>,
    #[serde(default)]
    pub modes: HashMap<String, ProfileConfig>,
    #[serde(default)]
    pub tones: HashMap<String, ProfileConfig>,
    #[serde(default)]
    pub styles: HashMap<String, ProfileConfig>,
}

/// Rule set metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// A single pattern → replacement pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

/// A tone, style or mode profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Instruction phrase used when building a generation prompt
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// One transformation step inside a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepConfig {
    Replace {
        from: String,
        #[serde(default)]
        to: String,
    },
    Prefix {
        text: String,
        #[serde(default)]
        when_contains: Vec<String>,
        #[serde(default)]
        unless_contains: Vec<String>,
    },
    Suffix {
        text: String,
        #[serde(default)]
        when_contains: Vec<String>,
        #[serde(default)]
        unless_contains: Vec<String>,
    },
}

impl RuleConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.trim().is_empty() {
            return Err("metadata.code must not be empty".to_string());
        }

        for (table, entries) in [
            ("weak_phrases", &self.weak_phrases),
            ("phrasing", &self.phrasing),
            ("connectors", &self.connectors),
        ] {
            if let Some(pos) = entries.iter().position(|e| e.pattern.is_empty()) {
                return Err(format!("empty pattern in {table} (entry {})", pos + 1));
            }
        }

        for key in self.modes.keys() {
            if CorrectionMode::from_key(key).is_none() {
                return Err(format!("unknown mode '{key}'"));
            }
        }
        for key in self.tones.keys() {
            if Tone::from_key(key).is_none() {
                return Err(format!("unknown tone '{key}'"));
            }
        }
        for key in self.styles.keys() {
            if Style::from_key(key).is_none() {
                return Err(format!("unknown style '{key}'"));
            }
        }

        let profiles = self
            .modes
            .iter()
            .chain(&self.tones)
            .chain(&self.styles);
        for (key, profile) in profiles {
            for step in &profile.steps {
                let empty = match step {
                    StepConfig::Replace { from, .. } => from.is_empty(),
                    StepConfig::Prefix { text, .. } | StepConfig::Suffix { text, .. } => {
                        text.is_empty()
                    }
                };
                if empty {
                    return Err(format!("empty step text in profile '{key}'"));
                }
            }
        }

        Ok(())
    }
}
