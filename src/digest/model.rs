//! Normalised work items and the deduplicated report built from them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::{IssueFilter, IssueQuery, RawItem};

/// The three listings, in the order they are fetched.
///
/// The order doubles as precedence: when the same link is produced by more
/// than one query, the record from the later query wins during
/// reconciliation.
pub const QUERIES: [IssueQuery; 3] = [
    IssueQuery::new(IssueFilter::Assigned, false),
    IssueQuery::new(IssueFilter::Created, false),
    IssueQuery::new(IssueFilter::Repos, true),
];

/// Label recorded in the report's `filter` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Found by the `assigned` query.
    Assigned,
    /// Found by the `created` query.
    Created,
    /// Found by the `repos` query without a review request.
    Repos,
    /// A pull request from the `repos` query on which the user is a
    /// requested reviewer.
    ReviewRequested,
}

impl Classification {
    /// Returns the label as written to the report.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Created => "created",
            Self::Repos => "repos",
            Self::ReviewRequested => "review_requested",
        }
    }
}

impl From<IssueFilter> for Classification {
    fn from(filter: IssueFilter) -> Self {
        match filter {
            IssueFilter::Assigned => Self::Assigned,
            IssueFilter::Created => Self::Created,
            IssueFilter::Repos => Self::Repos,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue or pull request normalised for the report.
///
/// Records are built once by the classifier and are read-only afterwards;
/// the only relabelling (`review_requested`) happens before the record
/// leaves the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    number: u64,
    title: String,
    link: String,
    repo_name: String,
    repo_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    pull_request: bool,
    source: IssueFilter,
    classification: Classification,
}

impl WorkItem {
    /// Normalises `item` as produced by the query for `source`.
    #[must_use]
    pub fn from_raw(item: &RawItem, source: IssueFilter) -> Self {
        Self {
            number: item.number,
            title: item.title.clone(),
            link: item.link().to_owned(),
            repo_name: item.repository.full_name.clone(),
            repo_url: item.repository.html_url.clone(),
            created_at: item.created_at,
            updated_at: item.updated_at,
            pull_request: item.is_pull_request(),
            source,
            classification: source.into(),
        }
    }

    pub(crate) const fn into_review_requested(mut self) -> Self {
        self.classification = Classification::ReviewRequested;
        self
    }

    /// Issue or pull request number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Browser URL; the identity key used for deduplication.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Repository in `owner/name` form.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Browser URL of the repository.
    #[must_use]
    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the item is a pull request.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request
    }

    /// The query that produced this record.
    #[must_use]
    pub const fn source(&self) -> IssueFilter {
        self.source
    }

    /// Label written to the report.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }
}

/// Deduplicated report: one row per distinct link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    rows: Vec<WorkItem>,
}

impl Report {
    pub(crate) const fn new(rows: Vec<WorkItem>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no rows survived.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in report order.
    #[must_use]
    pub fn rows(&self) -> &[WorkItem] {
        &self.rows
    }

    /// Looks up the row for `link`.
    #[must_use]
    pub fn get(&self, link: &str) -> Option<&WorkItem> {
        self.rows.iter().find(|row| row.link() == link)
    }
}
