//! Configuration module
//!
//! One TOML file configures both the engine (`[grammar]`, `[generation]`,
//! `[pipeline]`, `rules`) and the command line (`[output]`,
//! `[performance]`). Each side ignores the other's tables.

use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use typepolish_engine::config::CONFIG_TEMPLATE;
use typepolish_engine::EngineConfig;

/// CLI tables appended to the engine template by `generate-config`
const CLI_TEMPLATE: &str = r#"
[output]
# Pretty print JSON output
pretty_json = true

[performance]
# Worker threads for --parallel (0 = one per CPU)
worker_threads = 0
"#;

/// Commented template covering every configuration table
pub fn config_template() -> String {
    format!("{CONFIG_TEMPLATE}{CLI_TEMPLATE}")
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl PerformanceConfig {
    /// Worker thread count with `0` resolved to the number of CPUs
    pub fn threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

impl CliConfig {
    /// Parse the CLI tables of a configuration file
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

/// Options selecting the engine configuration
#[derive(Debug, Clone, Default, Args)]
pub struct ServiceArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "TYPEPOLISH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable the grammar and generation services
    #[arg(long)]
    pub offline: bool,
}

impl ServiceArgs {
    /// Load engine and CLI configuration, applying `--offline`
    pub fn load(&self) -> Result<(EngineConfig, CliConfig)> {
        let (engine, cli) = match &self.config {
            Some(path) => load_file(path)?,
            None => (EngineConfig::default(), CliConfig::default()),
        };

        if self.offline {
            log::info!("Offline mode: external services disabled");
            Ok((engine.offline(), cli))
        } else {
            Ok((engine, cli))
        }
    }
}

fn load_file(path: &Path) -> Result<(EngineConfig, CliConfig)> {
    log::debug!("Loading configuration from {}", path.display());
    let engine = EngineConfig::from_file(path)
        .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
    let cli = CliConfig::from_toml_str(&contents)?;
    Ok((engine, cli))
}
