//! Deduplication of collected records into the final report.
//!
//! Precedence is declared, not incidental: records are first ordered by the
//! position of their source query in [`QUERIES`], then the last record seen
//! for each link wins. A `repos` record labelled `review_requested`
//! therefore overrides an `assigned` or `created` record for the same link
//! whatever order the caller collected them in.

use std::collections::HashMap;

use crate::github::IssueFilter;

use super::model::{QUERIES, Report, WorkItem};

/// Position of `filter` in the query precedence order.
///
/// Filters missing from [`QUERIES`] rank after every declared query.
#[must_use]
pub fn precedence(filter: IssueFilter) -> usize {
    QUERIES
        .iter()
        .position(|query| query.filter() == filter)
        .unwrap_or(QUERIES.len())
}

/// Collapses `records` to one row per link, keeping the last occurrence.
///
/// The returned rows are ordered by most recent update first, then by link,
/// so unchanged input always yields the same report.
#[must_use]
pub fn reconcile(mut records: Vec<WorkItem>) -> Report {
    // Stable: completion order within a query is preserved.
    records.sort_by_key(|record| precedence(record.source()));

    let mut latest: HashMap<String, WorkItem> = HashMap::with_capacity(records.len());
    for record in records {
        latest.insert(record.link().to_owned(), record);
    }

    let mut rows: Vec<WorkItem> = latest.into_values().collect();
    rows.sort_by(|left, right| {
        right
            .updated_at()
            .cmp(&left.updated_at())
            .then_with(|| left.link().cmp(right.link()))
    });
    Report::new(rows)
}
