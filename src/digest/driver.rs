//! Runs the fixed query list and gathers every record and skip.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::ActivityConfig;
use crate::github::{IntakeError, IssueGateway, IssueQuery, PersonalAccessToken};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::classifier::ItemClassifier;
use super::fanout::FanOut;
use super::model::{QUERIES, WorkItem};
use super::page_source::PageSource;
use super::reviewers::ReviewerResolver;
use super::skipped::Skipped;

/// Everything one run of the driver produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestRun {
    /// Records in query order; completion order within a query.
    pub records: Vec<WorkItem>,
    /// Queries and pages that are missing from `records`.
    pub diagnostics: Vec<Skipped>,
}

impl DigestRun {
    /// Returns true when nothing was skipped.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Resolves the token and API base from `config`, logs in, and runs every
/// query with the configured worker limit.
///
/// The token is resolved before `build_gateway` is called, so a missing
/// token never reaches the network.
///
/// # Errors
///
/// Returns [`IntakeError::MissingToken`] when no token is configured,
/// [`IntakeError::InvalidUrl`] for a bad API base, and the gateway's error
/// when the client cannot be built or the login lookup fails. Failed
/// queries and pages are reported in [`DigestRun::diagnostics`] instead.
pub async fn collect_activity<G, F>(
    config: &ActivityConfig,
    build_gateway: F,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<DigestRun, IntakeError>
where
    G: IssueGateway + 'static,
    F: FnOnce(&PersonalAccessToken, &Url) -> Result<G, IntakeError>,
{
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let api_base = config.api_base_url()?;

    let gateway: Arc<dyn IssueGateway> = Arc::new(build_gateway(&token, &api_base)?);
    let login = gateway.authenticated_login().await?;
    info!(%login, workers = config.worker_limit(), "collecting activity");

    Ok(QueryDriver::new(gateway, login)
        .with_worker_limit(config.worker_limit())
        .with_telemetry(telemetry)
        .run()
        .await)
}

/// Drives each query through its page source and fan-out in turn.
pub struct QueryDriver {
    gateway: Arc<dyn IssueGateway>,
    login: Arc<str>,
    worker_limit: usize,
    telemetry: Arc<dyn TelemetrySink>,
}

impl QueryDriver {
    /// Creates a driver for the user `login`.
    ///
    /// The worker limit defaults to one and telemetry is discarded.
    #[must_use]
    pub fn new(gateway: Arc<dyn IssueGateway>, login: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            login: login.into(),
            worker_limit: 1,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Sets how many page workers may run at once within a query.
    #[must_use]
    pub const fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit;
        self
    }

    /// Sends skip and completion events to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Runs the assigned, created and repos queries, in that order.
    pub async fn run(&self) -> DigestRun {
        self.run_queries(&QUERIES).await
    }

    /// Runs `queries` in the given order.
    ///
    /// All records of one query precede those of the next. A failed query
    /// contributes nothing and the driver moves on.
    pub async fn run_queries(&self, queries: &[IssueQuery]) -> DigestRun {
        let resolver = ReviewerResolver::new(Arc::clone(&self.gateway), Arc::clone(&self.login));
        let mut run = DigestRun::default();

        for query in queries {
            let classifier = ItemClassifier::new(query.filter(), resolver.clone());
            let fan_out = FanOut::new(classifier, self.worker_limit);
            let pages = PageSource::new(Arc::clone(&self.gateway), *query);

            match fan_out.run(pages).await {
                Ok(outcome) => {
                    debug!(
                        filter = %query.filter(),
                        records = outcome.records.len(),
                        skipped = outcome.skipped.len(),
                        "query finished"
                    );
                    run.records.extend(outcome.records);
                    for skipped in outcome.skipped {
                        self.note(&mut run, skipped);
                    }
                }
                Err(skipped) => self.note(&mut run, skipped),
            }
        }

        info!(
            records = run.records.len(),
            skipped = run.diagnostics.len(),
            "digest run finished"
        );
        self.telemetry.record(TelemetryEvent::RunCompleted {
            records: run.records.len(),
            skipped: run.diagnostics.len(),
        });
        run
    }

    fn note(&self, run: &mut DigestRun, skipped: Skipped) {
        warn!(filter = %skipped.filter(), "{skipped}");
        self.telemetry.record(TelemetryEvent::from(&skipped));
        run.diagnostics.push(skipped);
    }
}
