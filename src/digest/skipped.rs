//! Recoverable failures that reduce a run's completeness.
//!
//! None of these stop the run. The driver collects them into
//! [`DigestRun::diagnostics`](super::DigestRun::diagnostics) so a caller can
//! tell a complete report from a degraded one.

use thiserror::Error;

use crate::github::{IntakeError, IssueFilter};

/// A query, page, or page remainder left out of the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Skipped {
    /// The first page of a query could not be fetched; the query contributes
    /// nothing.
    #[error("{filter} query skipped: {error}")]
    Query {
        /// Query that was abandoned.
        filter: IssueFilter,
        /// Failure returned for the first page.
        error: IntakeError,
    },

    /// A later page could not be fetched; it and every page after it are
    /// missing, earlier pages are kept.
    #[error("{filter} page {page} could not be fetched, later pages skipped: {error}")]
    PageFetch {
        /// Query being paged.
        filter: IssueFilter,
        /// Page whose request failed.
        page: u32,
        /// Failure returned for that page.
        error: IntakeError,
    },

    /// A reviewer lookup failed; the item was kept with its base label and
    /// the rest of its page was dropped.
    #[error("{filter} page {page} truncated after #{number}: {error}")]
    PageTruncated {
        /// Query being paged.
        filter: IssueFilter,
        /// Page that was cut short.
        page: u32,
        /// Number of the last item kept from that page.
        number: u64,
        /// Failure returned by the reviewer lookup.
        error: IntakeError,
    },

    /// The worker processing a page failed; none of that page's items are in
    /// the report.
    #[error("{filter} page worker failed: {reason}")]
    PageDropped {
        /// Query being paged.
        filter: IssueFilter,
        /// Join error reported for the worker.
        reason: String,
    },
}

impl Skipped {
    /// Query the failure belongs to.
    #[must_use]
    pub const fn filter(&self) -> IssueFilter {
        match self {
            Self::Query { filter, .. }
            | Self::PageFetch { filter, .. }
            | Self::PageTruncated { filter, .. }
            | Self::PageDropped { filter, .. } => *filter,
        }
    }

    /// Page the failure belongs to, when one is known.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Query { .. } => Some(1),
            Self::PageFetch { page, .. } | Self::PageTruncated { page, .. } => Some(*page),
            Self::PageDropped { .. } => None,
        }
    }
}
