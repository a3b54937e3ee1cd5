//! Parameters for the authenticated user's `/issues` listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::IntakeError;
use super::pagination::MAX_PER_PAGE;

/// The `filter` dimension of the `/issues` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueFilter {
    /// Items assigned to the authenticated user.
    Assigned,
    /// Items created by the authenticated user.
    Created,
    /// Items in every repository the user can access.
    Repos,
}

impl IssueFilter {
    /// Returns the API parameter value for this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Created => "created",
            Self::Repos => "repos",
        }
    }
}

impl fmt::Display for IssueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueFilter {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(Self::Assigned),
            "created" => Ok(Self::Created),
            "repos" => Ok(Self::Repos),
            _ => Err(IntakeError::Configuration {
                message: format!("unknown issue filter '{s}'"),
            }),
        }
    }
}

/// One top-level listing request.
///
/// State, sort, and direction are fixed to open / updated / descending for
/// every query; only the filter and the pull request restriction vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    filter: IssueFilter,
    pulls: bool,
}

impl IssueQuery {
    /// Only open items are listed.
    pub const STATE: &'static str = "open";
    /// Items are ordered by last update.
    pub const SORT: &'static str = "updated";
    /// Most recently updated first.
    pub const DIRECTION: &'static str = "desc";

    /// Creates a query for `filter`, restricted to pull requests when `pulls`
    /// is set.
    #[must_use]
    pub const fn new(filter: IssueFilter, pulls: bool) -> Self {
        Self { filter, pulls }
    }

    /// The filter this query lists.
    #[must_use]
    pub const fn filter(&self) -> IssueFilter {
        self.filter
    }

    /// Whether results are restricted to pull requests.
    #[must_use]
    pub const fn pulls(&self) -> bool {
        self.pulls
    }

    /// Items requested per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        MAX_PER_PAGE
    }
}
