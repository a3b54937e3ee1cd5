//! Wire models for the `/issues` and requested reviewer endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::IntakeError;
use super::locator::PullRequestRef;

/// Issue or pull request as returned by the `/issues` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawItem {
    /// Issue or pull request number within its repository.
    pub number: u64,
    /// Title as written by the author.
    pub title: String,
    /// Browser URL of the issue view.
    pub html_url: String,
    /// Repository the item belongs to.
    pub repository: RawRepository,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Present only when the item is a pull request.
    pub pull_request: Option<PullRequestLinks>,
}

impl RawItem {
    /// Returns true when GitHub attached pull request links to the item.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Browser URL identifying the item: the pull request page for pull
    /// requests, the issue page otherwise.
    #[must_use]
    pub fn link(&self) -> &str {
        self.pull_request
            .as_ref()
            .map_or(self.html_url.as_str(), |links| links.html_url.as_str())
    }

    /// Address of the pull request, or `None` for plain issues.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidReference`] when the repository payload
    /// lacks an owner or name.
    pub fn pull_request_ref(&self) -> Result<Option<PullRequestRef>, IntakeError> {
        if !self.is_pull_request() {
            return Ok(None);
        }

        PullRequestRef::new(
            &self.repository.owner.login,
            &self.repository.name,
            self.number,
        )
        .map(Some)
    }
}

/// Pull request links embedded in an `/issues` item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestLinks {
    /// Browser URL of the pull request.
    pub html_url: String,
}

/// Repository summary embedded in an `/issues` item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRepository {
    /// Short repository name.
    pub name: String,
    /// `owner/name` display form.
    pub full_name: String,
    /// Browser URL of the repository.
    pub html_url: String,
    /// Owning account.
    pub owner: RawOwner,
}

/// Owning account of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawOwner {
    /// Account login.
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRequestedReviewers {
    #[serde(default)]
    pub(crate) users: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: String,
}
