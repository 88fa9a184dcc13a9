//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use typepolish_api::RewriteResponse;

/// Plain text formatter - outputs one sentence or corrected text per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, _offset: usize) -> Result<()> {
        writeln!(self.writer, "{}", sentence.trim())?;
        Ok(())
    }

    fn format_response(&mut self, _source: &str, response: &RewriteResponse) -> Result<()> {
        writeln!(self.writer, "{}", response.corrected_text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
