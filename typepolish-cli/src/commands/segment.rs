//! Segment command implementation

use crate::input::InputArgs;
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use typepolish_core::{normalize, segment, Sentence};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        let documents = self.input.read_documents()?;
        let mut formatter = create_formatter(self.format, self.output.as_deref(), true)?;

        for document in &documents {
            let sentences = sentences_of(&document.text);
            log::info!("{}: {} sentence(s)", document.source, sentences.len());
            for sentence in &sentences {
                formatter.format_sentence(sentence.as_str(), sentence.offset())?;
            }
        }

        formatter.finish()
    }
}

/// Sentences of the whitespace-normalized text
fn sentences_of(text: &str) -> Vec<Sentence> {
    segment(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_of_normalizes_first() {
        let sentences = sentences_of("  Wait...   what?!\nok ");
        let texts: Vec<_> = sentences.iter().map(Sentence::as_str).collect();
        assert_eq!(texts, ["Wait...", "what?!", "ok"]);
        assert_eq!(sentences[1].offset(), 8);
    }

    #[test]
    fn test_blank_input_has_no_sentences() {
        assert!(sentences_of(" \n\t ").is_empty());
    }
}
