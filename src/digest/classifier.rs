//! Turns raw items into report records for one query.

use tracing::debug;

use crate::github::{IntakeError, IssueFilter, RawItem};

use super::model::WorkItem;
use super::reviewers::{ReviewerResolver, ReviewerStatus};

/// What the classifier decided for one raw item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Keep the record.
    Emit(WorkItem),
    /// Keep the record with its base label, then stop processing the page.
    Halt {
        /// Record kept despite the failed lookup.
        record: WorkItem,
        /// Failure that stopped the page.
        error: IntakeError,
    },
    /// Leave the item out of the report.
    Drop,
}

/// Records produced from one page, plus the reason it was cut short if it
/// was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecords {
    /// Records in the page's item order.
    pub records: Vec<WorkItem>,
    /// Number of the item after which processing stopped, and why.
    pub truncated: Option<(u64, IntakeError)>,
}

/// Classifies items for one query's filter.
///
/// Outside the `repos` query every item is kept under the query's own label.
/// Under `repos` only pull requests on which the user is a requested reviewer
/// survive, relabelled `review_requested`.
#[derive(Clone)]
pub struct ItemClassifier {
    filter: IssueFilter,
    resolver: ReviewerResolver,
}

impl ItemClassifier {
    /// Creates a classifier for items produced by the `filter` query.
    #[must_use]
    pub const fn new(filter: IssueFilter, resolver: ReviewerResolver) -> Self {
        Self { filter, resolver }
    }

    /// Filter whose items this classifier handles.
    #[must_use]
    pub const fn filter(&self) -> IssueFilter {
        self.filter
    }

    /// Classifies a single item.
    pub async fn classify(&self, item: &RawItem) -> Classified {
        let record = WorkItem::from_raw(item, self.filter);
        if self.filter != IssueFilter::Repos {
            return Classified::Emit(record);
        }

        let pull = match item.pull_request_ref() {
            Ok(Some(pull)) => pull,
            // The repos query is restricted to pull requests.
            Ok(None) => return Classified::Drop,
            Err(error) => return Classified::Halt { record, error },
        };

        match self.resolver.resolve(&pull).await {
            ReviewerStatus::Requested => Classified::Emit(record.into_review_requested()),
            ReviewerStatus::NotRequested => Classified::Drop,
            ReviewerStatus::Undetermined(error) => Classified::Halt { record, error },
        }
    }

    /// Classifies a page's items in order, stopping after the first
    /// [`Classified::Halt`].
    pub async fn classify_page(&self, items: &[RawItem]) -> PageRecords {
        let mut page = PageRecords::default();

        for item in items {
            match self.classify(item).await {
                Classified::Emit(record) => page.records.push(record),
                Classified::Drop => {
                    debug!(filter = %self.filter, link = item.link(), "item dropped");
                }
                Classified::Halt { record, error } => {
                    page.records.push(record);
                    page.truncated = Some((item.number, error));
                    break;
                }
            }
        }

        page
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::{always, function};
    use rstest::rstest;

    use super::{Classified, ItemClassifier};
    use crate::digest::model::Classification;
    use crate::digest::model::test_support::{issue, pull};
    use crate::digest::reviewers::ReviewerResolver;
    use crate::github::{
        IntakeError, IssueFilter, MockIssueGateway, PageInfo, PullRequestRef, ReviewerPage,
    };

    fn classifier_with(filter: IssueFilter, gateway: MockIssueGateway) -> ItemClassifier {
        ItemClassifier::new(filter, ReviewerResolver::new(Arc::new(gateway), "octocat"))
    }

    fn reviewers(logins: &[&str]) -> ReviewerPage {
        ReviewerPage {
            logins: logins.iter().map(|login| (*login).to_owned()).collect(),
            page_info: PageInfo::new(1, 100),
        }
    }

    fn for_number(number: u64) -> impl Fn(&PullRequestRef) -> bool {
        move |pull: &PullRequestRef| pull.number().get() == number
    }

    #[rstest]
    #[case(IssueFilter::Assigned, Classification::Assigned)]
    #[case(IssueFilter::Created, Classification::Created)]
    fn non_repos_items_keep_query_label(
        #[case] filter: IssueFilter,
        #[case] expected: Classification,
    ) {
        let mut gateway = MockIssueGateway::new();
        gateway.expect_requested_reviewers().never();
        let classifier = classifier_with(filter, gateway);
        let runtime = tokio::runtime::Runtime::new().expect("runtime should start");

        for item in [issue(1), pull(2)] {
            match runtime.block_on(classifier.classify(&item)) {
                Classified::Emit(record) => assert_eq!(record.classification(), expected),
                other => panic!("expected Emit, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn requested_review_relabels_pull_request() {
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .times(1)
            .returning(|_, _| Ok(reviewers(&["octocat"])));
        let classifier = classifier_with(IssueFilter::Repos, gateway);

        match classifier.classify(&pull(4)).await {
            Classified::Emit(record) => {
                assert_eq!(record.classification(), Classification::ReviewRequested);
                assert_eq!(record.source(), IssueFilter::Repos);
            }
            other => panic!("expected Emit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repos_pull_without_review_request_is_dropped() {
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .times(1)
            .returning(|_, _| Ok(reviewers(&["alice"])));
        let classifier = classifier_with(IssueFilter::Repos, gateway);

        assert_eq!(classifier.classify(&pull(4)).await, Classified::Drop);
    }

    #[tokio::test]
    async fn repos_issue_is_dropped_without_lookup() {
        let mut gateway = MockIssueGateway::new();
        gateway.expect_requested_reviewers().never();
        let classifier = classifier_with(IssueFilter::Repos, gateway);

        assert_eq!(classifier.classify(&issue(4)).await, Classified::Drop);
    }

    #[tokio::test]
    async fn lookup_failure_keeps_item_and_truncates_page() {
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .with(function(for_number(1)), always())
            .times(1)
            .returning(|_, _| Ok(reviewers(&["octocat"])));
        gateway
            .expect_requested_reviewers()
            .with(function(for_number(2)), always())
            .times(1)
            .returning(|_, _| {
                Err(IntakeError::Network {
                    message: "connection reset".to_owned(),
                })
            });
        gateway
            .expect_requested_reviewers()
            .with(function(for_number(3)), always())
            .never();
        let classifier = classifier_with(IssueFilter::Repos, gateway);

        let page = classifier
            .classify_page(&[pull(1), pull(2), pull(3)])
            .await;

        let labels: Vec<(u64, Classification)> = page
            .records
            .iter()
            .map(|record| (record.number(), record.classification()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (1, Classification::ReviewRequested),
                (2, Classification::Repos)
            ]
        );
        assert!(
            matches!(page.truncated, Some((2, IntakeError::Network { .. }))),
            "expected truncation after #2, got {:?}",
            page.truncated
        );
    }

    #[tokio::test]
    async fn dropped_items_do_not_truncate_page() {
        let mut gateway = MockIssueGateway::new();
        gateway
            .expect_requested_reviewers()
            .with(function(for_number(1)), always())
            .returning(|_, _| Ok(reviewers(&[])));
        gateway
            .expect_requested_reviewers()
            .with(function(for_number(2)), always())
            .returning(|_, _| Ok(reviewers(&["octocat"])));
        let classifier = classifier_with(IssueFilter::Repos, gateway);

        let page = classifier.classify_page(&[pull(1), pull(2)]).await;

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records.first().map(|record| record.number()), Some(2));
        assert!(page.truncated.is_none());
    }
}
