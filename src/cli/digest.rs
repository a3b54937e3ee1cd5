//! Digest operation: query, reconcile, and write the report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use github_activity::telemetry::{TelemetryEvent, TelemetrySink};
use github_activity::{
    ActivityConfig, IntakeError, IssueGateway, OctocrabIssueGateway, PersonalAccessToken,
    collect_activity, reconcile, write_report,
};
use url::Url;

use super::output::{io_error, write_run_summary};

/// Runs the digest against GitHub and prints a summary to stdout.
///
/// # Errors
///
/// Returns [`IntakeError::MissingToken`] before any network activity when no
/// token is configured, the login lookup failure when the token is rejected,
/// and [`IntakeError::Io`] when the report cannot be written. Failed queries
/// and pages are not errors; they are counted in the summary.
pub async fn run(
    config: &ActivityConfig,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<(), IntakeError> {
    let mut stdout = io::stdout();
    run_with_gateway_builder(config, OctocrabIssueGateway::for_token, telemetry, &mut stdout).await
}

/// Runs the digest using a custom gateway builder.
///
/// This function is exposed for testing against mock servers.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &ActivityConfig,
    build_gateway: F,
    telemetry: Arc<dyn TelemetrySink>,
    writer: &mut W,
) -> Result<(), IntakeError>
where
    G: IssueGateway + 'static,
    F: FnOnce(&PersonalAccessToken, &Url) -> Result<G, IntakeError>,
    W: Write,
{
    let format = config.export_format()?;
    let run = collect_activity(config, build_gateway, Arc::clone(&telemetry)).await?;
    let skipped = run.diagnostics.len();
    let report = reconcile(run.records);

    let file = File::create(&config.output).map_err(|e| io_error(&e))?;
    let mut output = BufWriter::new(file);
    write_report(&mut output, &report, format)?;
    telemetry.record(TelemetryEvent::ReportWritten {
        path: config.output.clone(),
        rows: report.len(),
    });

    write_run_summary(writer, report.len(), &config.output, skipped)
}
