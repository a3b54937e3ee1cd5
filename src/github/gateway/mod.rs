//! Gateway for the GitHub endpoints the activity digest reads.
//!
//! The trait-based design lets the pipeline run against mocks in tests while
//! the Octocrab implementation handles real HTTP requests.

mod error_mapping;
mod http_utils;
mod issues;

pub use issues::OctocrabIssueGateway;

use async_trait::async_trait;

use crate::github::error::IntakeError;
use crate::github::locator::PullRequestRef;
use crate::github::models::RawItem;
use crate::github::pagination::PageInfo;
use crate::github::query::IssueQuery;

/// One page of the `/issues` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePage {
    /// Items on this page, in the order GitHub returned them.
    pub items: Vec<RawItem>,
    /// Pagination state.
    pub page_info: PageInfo,
}

/// One page of a pull request's requested reviewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerPage {
    /// Logins of the individually requested reviewers.
    pub logins: Vec<String>,
    /// Pagination state.
    pub page_info: PageInfo,
}

/// Read access to the GitHub data the digest is built from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// Login of the user the token belongs to.
    async fn authenticated_login(&self) -> Result<String, IntakeError>;

    /// Fetch one page of the authenticated user's issues for `query`.
    async fn list_issues(&self, query: &IssueQuery, page: u32) -> Result<IssuePage, IntakeError>;

    /// Fetch one page of the reviewers requested on `pull`.
    async fn requested_reviewers(
        &self,
        pull: &PullRequestRef,
        page: u32,
    ) -> Result<ReviewerPage, IntakeError>;
}
