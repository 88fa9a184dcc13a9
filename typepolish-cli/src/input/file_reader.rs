//! Reading input text from arguments, files or stdin

use super::glob_resolver::resolve_patterns;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Source name used for text given on the command line
pub const INLINE_SOURCE: &str = "<text>";
/// Source name used for text read from stdin
pub const STDIN_SOURCE: &str = "<stdin>";

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read all of stdin as UTF-8 text
    pub fn read_stdin() -> Result<String> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Ok(content)
    }
}

/// One unit of input text with the name it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File path, [`INLINE_SOURCE`] or [`STDIN_SOURCE`]
    pub source: String,
    /// Raw text
    pub text: String,
}

impl Document {
    /// Create a document
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Where to read input text from
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Text to process
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Input files or patterns (supports glob); stdin is read when neither this nor --text is given
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,
}

impl InputArgs {
    /// Collect the documents to process, in a stable order
    pub fn read_documents(&self) -> Result<Vec<Document>> {
        if let Some(text) = &self.text {
            return Ok(vec![Document::new(INLINE_SOURCE, text.as_str())]);
        }

        if self.input.is_empty() {
            log::debug!("Reading input from stdin");
            return Ok(vec![Document::new(STDIN_SOURCE, FileReader::read_stdin()?)]);
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("Resolved {} input file(s)", files.len());
        files
            .iter()
            .map(|path| {
                FileReader::read_text(path)
                    .map(|text| Document::new(path.display().to_string(), text))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let content = "hello there.\nthis is a test";
        fs::write(&file_path, content).unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let path = Path::new("/nonexistent/file.txt");
        let result = FileReader::read_text(path);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read file"));
    }

    #[test]
    fn test_inline_text_wins() {
        let args = InputArgs {
            text: Some("i agree".to_string()),
            input: Vec::new(),
        };
        assert_eq!(
            args.read_documents().unwrap(),
            vec![Document::new(INLINE_SOURCE, "i agree")]
        );
    }

    #[test]
    fn test_documents_from_patterns() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("one.txt"), "first").unwrap();
        fs::write(temp_dir.path().join("two.txt"), "second").unwrap();

        let args = InputArgs {
            text: None,
            input: vec![format!("{}/*.txt", temp_dir.path().display())],
        };
        let docs = args.read_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].source.ends_with("one.txt"));
        assert_eq!(docs[1].text, "second");
    }

    #[cfg(unix)]
    #[test]
    fn test_read_text_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("binary.txt");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(FileReader::read_text(&file_path).is_err());
    }
}
