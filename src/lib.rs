//! GitHub activity digest library.
//!
//! Collects a user's open issues and pull requests from three GitHub
//! listings (`assigned`, `created`, and pull requests in the user's
//! repositories awaiting their review), reconciles overlapping results into
//! one row per link, and writes the report as CSV or JSON Lines.
//!
//! Failures that only reduce completeness (a failed query, page, or reviewer
//! lookup) never abort a run; they are returned as [`digest::Skipped`]
//! diagnostics alongside the records that did arrive.

pub mod config;
pub mod digest;
pub mod export;
pub mod github;
pub mod telemetry;

pub use config::ActivityConfig;
pub use digest::{
    Classification, DigestRun, QueryDriver, Report, Skipped, WorkItem, collect_activity,
    reconcile,
};
pub use export::{ExportFormat, ReportRow, write_report};
pub use github::{IntakeError, IssueGateway, OctocrabIssueGateway, PersonalAccessToken};
