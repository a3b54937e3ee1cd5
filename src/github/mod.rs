//! GitHub access for the activity digest.
//!
//! This module wraps Octocrab to list the authenticated user's issues and pull
//! requests and to look up the reviewers requested on a pull request. Errors
//! are mapped into user-friendly variants so that callers can surface precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod query;

pub use error::IntakeError;
pub use gateway::{IssueGateway, IssuePage, OctocrabIssueGateway, ReviewerPage};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestNumber, PullRequestRef, RepositoryName,
    RepositoryOwner, parse_api_base,
};
pub use models::{PullRequestLinks, RawItem, RawOwner, RawRepository};
pub use pagination::PageInfo;
pub use query::{IssueFilter, IssueQuery};

#[cfg(test)]
pub use gateway::MockIssueGateway;
