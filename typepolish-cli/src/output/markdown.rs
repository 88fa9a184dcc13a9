//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use typepolish_api::RewriteResponse;

/// Markdown formatter - numbered sentences or one section per document
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sentence_count: usize,
    document_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentence_count: 0,
            document_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, _offset: usize) -> Result<()> {
        self.sentence_count += 1;
        writeln!(self.writer, "{}. {}", self.sentence_count, sentence.trim())?;
        Ok(())
    }

    fn format_response(&mut self, source: &str, response: &RewriteResponse) -> Result<()> {
        self.document_count += 1;
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", response.corrected_text)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "> {}", response.changes_summary)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.document_count == 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "---")?;
        if self.document_count > 0 {
            writeln!(self.writer, "*Total documents: {}*", self.document_count)?;
        } else {
            writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
