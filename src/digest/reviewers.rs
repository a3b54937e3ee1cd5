//! Requested-reviewer lookup for pull requests found by the `repos` query.

use std::sync::Arc;

use crate::github::{IntakeError, IssueGateway, PullRequestRef};

/// Outcome of a reviewer lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewerStatus {
    /// The user is among the requested reviewers.
    Requested,
    /// Every page was read and the user is not listed.
    NotRequested,
    /// The lookup failed before an answer was known.
    Undetermined(IntakeError),
}

/// Checks whether one login is a requested reviewer on a pull request.
///
/// Clones share the gateway and login, so one resolver can be handed to every
/// page worker.
#[derive(Clone)]
pub struct ReviewerResolver {
    gateway: Arc<dyn IssueGateway>,
    login: Arc<str>,
}

impl ReviewerResolver {
    /// Creates a resolver answering for `login`.
    #[must_use]
    pub fn new(gateway: Arc<dyn IssueGateway>, login: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            login: login.into(),
        }
    }

    /// Login the resolver answers for.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Pages through the reviewers requested on `pull`.
    ///
    /// Errors never propagate: any failed page turns the whole answer into
    /// [`ReviewerStatus::Undetermined`].
    pub async fn resolve(&self, pull: &PullRequestRef) -> ReviewerStatus {
        match self.is_requested(pull).await {
            Ok(true) => ReviewerStatus::Requested,
            Ok(false) => ReviewerStatus::NotRequested,
            Err(error) => ReviewerStatus::Undetermined(error),
        }
    }

    async fn is_requested(&self, pull: &PullRequestRef) -> Result<bool, IntakeError> {
        let mut page = 1;
        loop {
            let reviewers = self.gateway.requested_reviewers(pull, page).await?;
            if reviewers.logins.iter().any(|login| login.as_str() == self.login.as_ref()) {
                return Ok(true);
            }

            match reviewers.page_info.next_page() {
                Some(next) => page = next,
                None => return Ok(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::{always, eq};
    use rstest::rstest;

    use super::{ReviewerResolver, ReviewerStatus};
    use crate::github::{IntakeError, MockIssueGateway, PageInfo, PullRequestRef, ReviewerPage};

    fn reviewers(page: u32, has_next: bool, logins: &[&str]) -> ReviewerPage {
        ReviewerPage {
            logins: logins.iter().map(|login| (*login).to_owned()).collect(),
            page_info: PageInfo::new(page, 100).with_has_next(has_next),
        }
    }

    fn sample_pull() -> PullRequestRef {
        PullRequestRef::new("octo", "widgets", 7).expect("reference should be valid")
    }

    #[rstest]
    #[case::listed(&["alice", "octocat"], ReviewerStatus::Requested)]
    #[case::not_listed(&["alice"], ReviewerStatus::NotRequested)]
    #[case::nobody(&[], ReviewerStatus::NotRequested)]
    #[case::case_sensitive(&["OctoCat"], ReviewerStatus::NotRequested)]
    fn single_page_lookup(
        #[case] logins: &'static [&'static str],
        #[case] expected: ReviewerStatus,
    ) {
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .with(always(), eq(1_u32))
            .times(1)
            .returning(move |_, _| Ok(reviewers(1, false, logins)));

        let resolver = ReviewerResolver::new(Arc::new(gateway), "octocat");
        let runtime = tokio::runtime::Runtime::new().expect("runtime should start");
        let status = runtime.block_on(resolver.resolve(&sample_pull()));

        assert_eq!(status, expected);
    }

    #[tokio::test]
    async fn follows_next_pages_until_found() {
        let pull = sample_pull();
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .with(always(), eq(1_u32))
            .times(1)
            .returning(|_, _| Ok(reviewers(1, true, &["alice"])));
        gateway
            .expect_requested_reviewers()
            .with(always(), eq(2_u32))
            .times(1)
            .returning(|_, _| Ok(reviewers(2, true, &["octocat"])));

        let resolver = ReviewerResolver::new(Arc::new(gateway), "octocat");

        assert_eq!(resolver.resolve(&pull).await, ReviewerStatus::Requested);
    }

    #[tokio::test]
    async fn failure_on_later_page_is_undetermined() {
        let pull = sample_pull();
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .with(always(), eq(1_u32))
            .times(1)
            .returning(|_, _| Ok(reviewers(1, true, &["alice"])));
        gateway
            .expect_requested_reviewers()
            .with(always(), eq(2_u32))
            .times(1)
            .returning(|_, _| {
                Err(IntakeError::RateLimitExceeded {
                    reset_at: None,
                    message: "API rate limit exceeded".to_owned(),
                })
            });

        let resolver = ReviewerResolver::new(Arc::new(gateway), "octocat");

        assert!(
            matches!(
                resolver.resolve(&pull).await,
                ReviewerStatus::Undetermined(IntakeError::RateLimitExceeded { .. })
            ),
            "expected Undetermined"
        );
    }
}
