//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use typepolish_core::{builtin_rules, CorrectionMode, Style, Tone};

pub mod generate_config;
pub mod request;
pub mod rewrite;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Correct grammar and spelling, then apply a correction mode
    Correct(rewrite::CorrectArgs),

    /// Polish text with a tone and writing style
    Polish(rewrite::PolishArgs),

    /// Rewrite text in a tone using the rule-based rewriter
    RewriteTone(rewrite::RewriteToneArgs),

    /// Split text into sentences
    Segment(segment::SegmentArgs),

    /// Send a JSON body to an endpoint route and print the response
    Request(request::RequestArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a rewrite rule file
    Validate(validate::ValidateArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available tones
    Tones,

    /// List available writing styles
    Styles,

    /// List available correction modes
    Modes,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Correct(args) => args.execute(quiet),
            Commands::Polish(args) => args.execute(quiet),
            Commands::RewriteTone(args) => args.execute(quiet),
            Commands::Segment(args) => args.execute(),
            Commands::Request(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Output lines for the listing
    pub fn lines(&self) -> Vec<String> {
        let rules = builtin_rules();
        match self {
            ListCommands::Tones => {
                let mut lines = vec!["Available tones:".to_string()];
                lines.extend(Tone::ALL.iter().map(|tone| {
                    let instruction = rules.tone(*tone).and_then(|p| p.instruction());
                    entry(tone.as_str(), instruction.unwrap_or_default())
                }));
                lines
            }
            ListCommands::Styles => {
                let mut lines = vec!["Available styles:".to_string()];
                lines.extend(Style::ALL.iter().map(|style| {
                    let instruction = rules.style(*style).and_then(|p| p.instruction());
                    let description = match style {
                        Style::Romantic => {
                            format!("{} (alias: soft)", instruction.unwrap_or_default())
                        }
                        _ => instruction.unwrap_or_default().to_string(),
                    };
                    entry(style.as_str(), &description)
                }));
                lines
            }
            ListCommands::Modes => {
                let mut lines = vec!["Available correction modes:".to_string()];
                lines.extend(CorrectionMode::ALL.iter().map(|mode| {
                    let description = match mode {
                        CorrectionMode::Grammar => "grammar and spelling only",
                        CorrectionMode::Professional => "expand slang and contractions",
                        CorrectionMode::Casual => "swap formal address for casual address",
                    };
                    entry(mode.as_str(), description)
                }));
                lines
            }
        }
    }
}

fn entry(key: &str, description: &str) -> String {
    format!("  {key:<14}{description}").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tones() {
        let lines = ListCommands::Tones.lines();
        assert_eq!(lines[0], "Available tones:");
        assert_eq!(lines.len(), 1 + Tone::ALL.len());
        assert_eq!(lines[1], "  friendly      in a warm, friendly tone");
    }

    #[test]
    fn test_list_styles_mentions_alias() {
        let lines = ListCommands::Styles.lines();
        assert!(lines
            .iter()
            .any(|l| l.starts_with("  romantic") && l.ends_with("(alias: soft)")));
    }

    #[test]
    fn test_list_modes() {
        let lines = ListCommands::Modes.lines();
        assert_eq!(
            lines[1..],
            [
                "  grammar       grammar and spelling only",
                "  professional  expand slang and contractions",
                "  casual        swap formal address for casual address",
            ]
        );
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Modes,
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Modes"));
    }
}
