//! Concurrent per-page classification for one query.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::github::IssueFilter;

use super::classifier::{ItemClassifier, PageRecords};
use super::model::WorkItem;
use super::page_source::PageSource;
use super::skipped::Skipped;

/// Records and skips gathered from every page of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Records in page-completion order, item order within a page.
    pub records: Vec<WorkItem>,
    /// Pages that were lost or cut short.
    pub skipped: Vec<Skipped>,
}

/// Spawns one worker per fetched page, at most `limit` running at once.
///
/// Pages are fetched sequentially by the coordinator while workers classify
/// earlier pages. Results are folded in the order workers finish.
pub struct FanOut {
    classifier: Arc<ItemClassifier>,
    limit: usize,
}

impl FanOut {
    /// Creates a coordinator. A `limit` of zero is treated as one.
    #[must_use]
    pub fn new(classifier: ItemClassifier, limit: usize) -> Self {
        Self {
            classifier: Arc::new(classifier),
            limit: limit.max(1),
        }
    }

    /// Maximum number of page workers running at the same time.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Drains `pages`, classifying each page on its own worker.
    ///
    /// # Errors
    ///
    /// Returns [`Skipped::Query`] when the first page cannot be fetched; the
    /// query then contributes nothing. Later failures are reported in
    /// [`QueryOutcome::skipped`] instead.
    pub async fn run(&self, mut pages: PageSource) -> Result<QueryOutcome, Skipped> {
        let filter = self.classifier.filter();
        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut workers = JoinSet::new();
        let mut outcome = QueryOutcome::default();

        while let Some(fetched) = pages.next_page().await {
            let page = match fetched {
                Ok(fetched_page) => fetched_page,
                Err(failure) if failure.number == 1 => {
                    workers.abort_all();
                    return Err(Skipped::Query {
                        filter,
                        error: failure.error,
                    });
                }
                Err(failure) => {
                    outcome.skipped.push(Skipped::PageFetch {
                        filter,
                        page: failure.number,
                        error: failure.error,
                    });
                    break;
                }
            };

            let classifier = Arc::clone(&self.classifier);
            let permits = Arc::clone(&semaphore);
            workers.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let records = classifier.classify_page(&page.items).await;
                (page.number, records)
            });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((number, page)) => Self::fold_page(&mut outcome, filter, number, page),
                Err(join_error) => {
                    warn!(%filter, error = %join_error, "page worker failed");
                    outcome.skipped.push(Skipped::PageDropped {
                        filter,
                        reason: join_error.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    fn fold_page(
        outcome: &mut QueryOutcome,
        filter: IssueFilter,
        number: u32,
        page: PageRecords,
    ) {
        debug!(%filter, page = number, records = page.records.len(), "page classified");
        outcome.records.extend(page.records);
        if let Some((item, error)) = page.truncated {
            outcome.skipped.push(Skipped::PageTruncated {
                filter,
                page: number,
                number: item,
                error,
            });
        }
    }
}
