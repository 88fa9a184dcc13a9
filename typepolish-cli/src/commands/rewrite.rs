//! `correct`, `polish` and `rewrite-tone` command implementations

use crate::config::ServiceArgs;
use crate::input::{Document, InputArgs};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use typepolish_api::{
    CorrectRequest, PolishRequest, RewriteResponse, RewriteToneRequest, TextService,
};
use typepolish_engine::summary::is_degraded;

/// Options shared by the rewriting commands
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Process multiple input files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: configuration, then CPU count)
    #[arg(long, value_name = "N", requires = "parallel")]
    pub threads: Option<usize>,
}

/// Arguments for the correct command
#[derive(Debug, Args)]
pub struct CorrectArgs {
    /// Correction mode: grammar, professional or casual
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Arguments for the polish command
#[derive(Debug, Args)]
pub struct PolishArgs {
    /// Target tone (default: friendly)
    #[arg(long, value_name = "TONE")]
    pub tone: Option<String>,

    /// Target writing style (default: neutral)
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Arguments for the rewrite-tone command
#[derive(Debug, Args)]
pub struct RewriteToneArgs {
    /// Target tone
    #[arg(long, value_name = "TONE", required = true)]
    pub tone: String,

    #[command(flatten)]
    pub run: RunArgs,
}

/// One endpoint operation applied to every input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `POST /correct`
    Correct {
        /// Requested mode label
        mode: Option<String>,
    },
    /// `POST /polish-ai`
    Polish {
        /// Requested tone label
        tone: Option<String>,
        /// Requested style label
        style: Option<String>,
    },
    /// `POST /rewrite-tone`
    RewriteTone {
        /// Requested tone label
        tone: String,
    },
}

impl Operation {
    /// Run the operation on `text` through the endpoint handlers
    pub fn apply(&self, service: &TextService, text: &str) -> RewriteResponse {
        match self {
            Operation::Correct { mode } => service.correct(&CorrectRequest {
                text: text.to_string(),
                mode: mode.clone(),
            }),
            Operation::Polish { tone, style } => service.polish_ai(&PolishRequest {
                text: text.to_string(),
                tone: tone.clone(),
                style: style.clone(),
            }),
            Operation::RewriteTone { tone } => service.rewrite_tone(&RewriteToneRequest {
                text: text.to_string(),
                tone: tone.clone(),
            }),
        }
    }
}

impl CorrectArgs {
    /// Execute the correct command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let operation = Operation::Correct {
            mode: self.mode.clone(),
        };
        self.run.execute(&operation, quiet)
    }
}

impl PolishArgs {
    /// Execute the polish command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let operation = Operation::Polish {
            tone: self.tone.clone(),
            style: self.style.clone(),
        };
        self.run.execute(&operation, quiet)
    }
}

impl RewriteToneArgs {
    /// Execute the rewrite-tone command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let operation = Operation::RewriteTone {
            tone: self.tone.clone(),
        };
        self.run.execute(&operation, quiet)
    }
}

impl RunArgs {
    /// Apply `operation` to every input document and write the responses
    pub fn execute(&self, operation: &Operation, quiet: bool) -> Result<()> {
        log::debug!("Arguments: {:?}", self);
        let (engine_config, cli_config) = self.service.load()?;
        let service =
            TextService::from_config(&engine_config).context("Failed to build the pipeline")?;
        let documents = self.input.read_documents()?;

        let mut progress = ProgressReporter::new(quiet);
        progress.init_files(documents.len() as u64);

        let process = |document: &Document| {
            let response = operation.apply(&service, &document.text);
            progress.file_completed(&document.source);
            response
        };

        let responses: Vec<RewriteResponse> = if self.parallel && documents.len() > 1 {
            let threads = self
                .threads
                .unwrap_or_else(|| cli_config.performance.threads());
            log::info!(
                "Processing {} documents on {} threads",
                documents.len(),
                threads
            );
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to start worker threads")?;
            pool.install(|| documents.par_iter().map(process).collect())
        } else {
            documents.iter().map(process).collect()
        };
        progress.finish();

        let mut formatter = create_formatter(
            self.format,
            self.output.as_deref(),
            cli_config.output.pretty_json,
        )?;
        for (document, response) in documents.iter().zip(&responses) {
            if is_degraded(&response.changes_summary) {
                log::warn!("{}: {}", document.source, response.changes_summary);
            } else {
                log::info!("{}: {}", document.source, response.changes_summary);
            }
            formatter.format_response(&document.source, response)?;
        }
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_route_through_service() {
        let service = TextService::offline();

        let correct = Operation::Correct {
            mode: Some("professional".to_string()),
        };
        let response = correct.apply(&service, "i don't know");
        assert_eq!(response.corrected_text, "I do not know.");
        assert!(response.applied_tone.is_none());

        let polish = Operation::Polish {
            tone: Some("calm".to_string()),
            style: None,
        };
        let response = polish.apply(&service, "but i left");
        assert_eq!(response.corrected_text, "However, I left. No rush.");
        assert_eq!(response.applied_tone.as_deref(), Some("calm"));
        assert_eq!(response.applied_style.as_deref(), Some("neutral"));

        let rewrite = Operation::RewriteTone {
            tone: "neutral".to_string(),
        };
        let response = rewrite.apply(&service, "so we left. so we left.");
        assert_eq!(response.corrected_text, "As a result, we left.");
        assert!(response.applied_tone.is_none());
    }

    #[test]
    fn test_empty_text_short_circuits() {
        let service = TextService::offline();
        let response = Operation::RewriteTone {
            tone: "caring".to_string(),
        }
        .apply(&service, "   ");
        assert_eq!(response, RewriteResponse::no_text());
    }
}
