//! Run diagnostics: structured telemetry events, their sinks, and tracing
//! setup for the binary.
//!
//! Skipped queries and pages are never silent. The driver logs each one with
//! `tracing` and also hands it to a [`TelemetrySink`] so scripted callers can
//! consume a machine-readable record of what the report is missing.

use std::io;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::digest::Skipped;
use crate::github::IssueFilter;

/// A structured telemetry event emitted during a digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A query contributed nothing because its first page failed.
    QuerySkipped {
        /// Query that was abandoned.
        filter: IssueFilter,
        /// Failure text.
        reason: String,
    },
    /// A page was lost or cut short.
    PageSkipped {
        /// Query the page belongs to.
        filter: IssueFilter,
        /// Page number, when known.
        page: Option<u32>,
        /// Failure text.
        reason: String,
    },
    /// All queries finished.
    RunCompleted {
        /// Records collected before reconciliation.
        records: usize,
        /// Number of skip diagnostics.
        skipped: usize,
    },
    /// The report file was written.
    ReportWritten {
        /// Destination path.
        path: String,
        /// Rows written.
        rows: usize,
    },
}

impl From<&Skipped> for TelemetryEvent {
    fn from(skipped: &Skipped) -> Self {
        match skipped {
            Skipped::Query { filter, error } => Self::QuerySkipped {
                filter: *filter,
                reason: error.to_string(),
            },
            other => Self::PageSkipped {
                filter: other.filter(),
                page: other.page(),
                reason: other.to_string(),
            },
        }
    }
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`. With `json` set, log lines are
/// emitted as newline-delimited JSON. Only the first call in a process has
/// any effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .try_init()
            .ok();
    }
}
