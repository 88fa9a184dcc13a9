//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use typepolish_core::{RuleSet, Style, Tone};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the rewrite rule file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub rules: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule file: {}", self.rules.display());

        match RuleSet::from_file(&self.rules) {
            Ok(rules) => {
                println!("✓ Rule file is valid!");
                for line in describe(&rules) {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Rule file is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}

/// Summary lines for a loaded rule set
fn describe(rules: &RuleSet) -> Vec<String> {
    let tones: Vec<_> = Tone::ALL
        .iter()
        .filter(|tone| rules.tone(**tone).is_some())
        .map(Tone::as_str)
        .collect();
    let styles: Vec<_> = Style::ALL
        .iter()
        .filter(|style| rules.style(**style).is_some())
        .map(Style::as_str)
        .collect();

    vec![
        format!("Code: {}", rules.code()),
        format!("Name: {}", rules.name()),
        format!(
            "Phrase rules: {} weak, {} phrasing, {} connectors",
            rules.weak_phrases().len(),
            rules.phrasing().len(),
            rules.connectors().len()
        ),
        format!("Tones: {}", list_or_none(&tones)),
        format!("Styles: {}", list_or_none(&styles)),
    ]
}

fn list_or_none(keys: &[&str]) -> String {
    if keys.is_empty() {
        "(none)".to_string()
    } else {
        keys.join(", ")
    }
}
