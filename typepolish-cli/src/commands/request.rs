//! Request command implementation
//!
//! Sends a JSON body to one route of the endpoint contract and prints the
//! JSON response, the same exchange an HTTP front end would perform.

use crate::config::ServiceArgs;
use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use typepolish_api::{ApiError, Route, TextService};

/// Arguments for the request command
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Route path: /, /correct, /polish-ai or /rewrite-tone
    #[arg(value_name = "ROUTE")]
    pub route: String,

    /// JSON request body
    #[arg(short, long, value_name = "JSON", conflicts_with = "input")]
    pub body: Option<String>,

    /// File holding the JSON request body (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

impl RequestArgs {
    /// Execute the request command
    pub fn execute(&self) -> Result<()> {
        let route = self.route.parse::<Route>().map_err(rejected)?;
        let body = self.read_body(route)?;

        let (engine_config, _) = self.service.load()?;
        let service = TextService::from_config(&engine_config).map_err(rejected)?;

        log::info!("{} {}", route.method(), route.path());
        let response = service.handle(route, &body).map_err(rejected)?;
        println!("{response}");
        Ok(())
    }

    fn read_body(&self, route: Route) -> Result<String> {
        if let Some(body) = &self.body {
            return Ok(body.clone());
        }
        if let Some(path) = &self.input {
            return FileReader::read_text(path);
        }
        if route == Route::Health {
            return Ok(String::new());
        }
        FileReader::read_stdin()
    }
}

fn rejected(error: ApiError) -> CliError {
    CliError::RequestFailed {
        status: error.status_code(),
        message: error.to_string(),
    }
}
