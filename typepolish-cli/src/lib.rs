//! TypePolish command-line interface
//!
//! Runs the correction and tone pipelines over text from arguments, files
//! or stdin, and exposes the endpoint contract through `typepolish request`.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

use clap::Parser;

/// Top-level command line
#[derive(Debug, Parser)]
#[command(name = "typepolish", version, long_about = None)]
#[command(about = "Grammar correction and tone rewriting for English text")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: commands::Commands,
}

impl Cli {
    /// Log filter implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if !self.quiet {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(self.log_level()),
            )
            .init();
        }
    }

    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        self.command.execute(self.quiet)
    }
}
