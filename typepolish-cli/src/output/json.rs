//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use typepolish_api::RewriteResponse;

/// JSON formatter - outputs response bodies or a sentence array
///
/// A single response is written as the bare response body, exactly as the
/// endpoint would return it. Several responses become an array tagged with
/// their source.
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sentences: Vec<SentenceData>,
    responses: Vec<ResponseData>,
}

/// Data structure for sentence output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// The sentence text
    pub text: String,
    /// Starting byte offset in the normalized text
    pub offset: usize,
    /// Length of the sentence in bytes
    pub length: usize,
}

/// A response tagged with the document it was produced for
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseData {
    /// File path or input marker
    pub source: String,
    /// Response body
    #[serde(flatten)]
    pub response: RewriteResponse,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            sentences: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, sentence: &str, offset: usize) -> Result<()> {
        self.sentences.push(SentenceData {
            text: sentence.trim().to_string(),
            offset,
            length: sentence.len(),
        });
        Ok(())
    }

    fn format_response(&mut self, source: &str, response: &RewriteResponse) -> Result<()> {
        self.responses.push(ResponseData {
            source: source.to_string(),
            response: response.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let responses = std::mem::take(&mut self.responses);
        match responses.as_slice() {
            [] => {
                let sentences = std::mem::take(&mut self.sentences);
                self.write_value(&sentences)?;
            }
            [single] => self.write_value(&single.response)?,
            all => self.write_value(all)?,
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
