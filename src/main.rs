//! `github-activity` CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use github_activity::telemetry::{
    NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink, init_tracing,
};
use github_activity::{ActivityConfig, IntakeError};
use ortho_config::OrthoConfig;
use tracing::Level;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            exit_code(&error)
        }
    }
}

/// Configuration problems exit with 2; failures talking to GitHub or
/// writing the report exit with 1.
fn exit_code(error: &IntakeError) -> ExitCode {
    if error.is_configuration() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

async fn run() -> Result<(), IntakeError> {
    let config = load_config()?;
    init_tracing(config.log_json, Level::INFO);

    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    cli::digest::run(&config, telemetry).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ActivityConfig, IntakeError> {
    ActivityConfig::load().map_err(|error| IntakeError::Configuration {
        message: error.to_string(),
    })
}
