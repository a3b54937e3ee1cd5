//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.github-activity.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `GITHUB_ACTIVITY_TOKEN`,
//!    `GITHUB_ACTIVITY_OUTPUT`, ...; the token also falls back to
//!    `ACCESS_TOKEN` and `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--output`/`-o`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! output = "github_activity.csv"
//! format = "csv"
//! api_base = "https://api.github.com"
//! concurrency = 8
//! ```

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::export::ExportFormat;
use crate::github::{DEFAULT_API_BASE, IntakeError, parse_api_base};

/// Default report path.
pub const DEFAULT_OUTPUT: &str = "github_activity.csv";

/// Environment variables consulted, in order, when no token is configured.
pub const TOKEN_FALLBACK_VARS: [&str; 2] = ["ACCESS_TOKEN", "GITHUB_TOKEN"];

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use github_activity::ActivityConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ActivityConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GITHUB_ACTIVITY",
    discovery(
        dotfile_name = ".github-activity.toml",
        config_file_name = "github-activity.toml",
        app_name = "github-activity"
    )
)]
pub struct ActivityConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GITHUB_ACTIVITY_TOKEN`, then `ACCESS_TOKEN` or
    ///   `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Path the report is written to.
    #[ortho_config(cli_short = 'o')]
    pub output: String,

    /// Report format, `csv` or `jsonl`.
    #[ortho_config(cli_short = 'f')]
    pub format: String,

    /// GitHub API base URL; set this for GitHub Enterprise.
    #[ortho_config()]
    pub api_base: String,

    /// Page workers allowed to run at once per query; `0` uses the host's
    /// available parallelism.
    #[ortho_config(cli_short = 'j')]
    pub concurrency: usize,

    /// Emits telemetry events to stderr as JSON lines.
    ///
    /// Note: boolean values are not read from the environment by
    /// `ortho_config`; use the CLI flag or the config file.
    #[ortho_config()]
    pub telemetry: bool,

    /// Emits log lines as JSON.
    #[ortho_config()]
    pub log_json: bool,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            token: None,
            output: DEFAULT_OUTPUT.to_owned(),
            format: ExportFormat::Csv.to_string(),
            api_base: DEFAULT_API_BASE.to_owned(),
            concurrency: 0,
            telemetry: false,
            log_json: false,
        }
    }
}

impl ActivityConfig {
    /// Resolves the token from configuration, then from `ACCESS_TOKEN`, then
    /// from `GITHUB_TOKEN`.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no source provides a value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                TOKEN_FALLBACK_VARS
                    .iter()
                    .filter_map(|name| env::var(name).ok())
                    .find(|token| !token.trim().is_empty())
            })
            .ok_or(IntakeError::MissingToken)
    }

    /// Parses the configured report format.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for an unsupported format.
    pub fn export_format(&self) -> Result<ExportFormat, IntakeError> {
        self.format.parse()
    }

    /// Parses the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidUrl`] when the value is not an HTTP(S)
    /// URL with a host.
    pub fn api_base_url(&self) -> Result<Url, IntakeError> {
        parse_api_base(&self.api_base)
    }

    /// Resolves the page worker limit, replacing `0` with the host's
    /// available parallelism.
    #[must_use]
    pub fn worker_limit(&self) -> usize {
        if self.concurrency > 0 {
            return self.concurrency;
        }
        thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }
}

#[cfg(test)]
mod tests;
