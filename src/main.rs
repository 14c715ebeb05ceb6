//! Main entry point for the application.
//!
//! Loads the scenario and credentials files, builds one REST client per role and
//! replays the scenario against the document server:
//! - create the document (uploading files and resolving users in its properties)
//! - start the configured workflow
//! - complete each step's task as the step's role
//! - check for remaining workflows and delete the document when none are left

mod cli;
mod config;
mod constants;
mod core;
mod errors;
mod nuxeo;
mod substitution;
mod utils;

use clap::Parser;
use crate::core::{ScenarioReport, ScenarioRunner};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Load environment variables from `.env`
/// 2. Parse CLI arguments
/// 3. Initialize logging system
/// 4. Load configuration and run the scenario
#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }
    debug!("{:?}", cli);

    match run(cli).await {
        Ok(report) => {
            info!(
                "Scenario finished on {} ({} open workflow(s), deleted: {})",
                report.document.path,
                report.open_workflows.len(),
                report.deleted
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scenario failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> errors::Result<ScenarioReport> {
    let config = config::load_scenario_config(&cli.config)?;
    let credentials = config::load_credentials(&cli.credentials)?;

    let server_url = config.server_url(cli.server_url.as_deref())?;
    info!("Server URL: {}", server_url);
    debug!("Scenario: {}", utils::pretty_print(&config));

    let runner = ScenarioRunner::new(config, credentials, &server_url, cli.timeout)?;
    runner.run().await
}
