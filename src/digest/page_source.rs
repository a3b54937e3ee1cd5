//! Lazy walk over the pages of one `/issues` query.

use std::sync::Arc;

use tracing::debug;

use crate::github::{IntakeError, IssueGateway, IssueQuery, RawItem};

/// One fetched page of raw items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// 1-based page number.
    pub number: u32,
    /// Items in GitHub's order.
    pub items: Vec<RawItem>,
}

/// A page request that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetchError {
    /// Page whose request failed.
    pub number: u32,
    /// Failure reported by the gateway.
    pub error: IntakeError,
}

/// Finite, non-restartable sequence of pages for a single query.
///
/// Pages are requested one at a time as the caller asks for them. The
/// sequence ends when GitHub stops advertising a next page or when a request
/// fails; a failure is yielded once and nothing follows it.
pub struct PageSource {
    gateway: Arc<dyn IssueGateway>,
    query: IssueQuery,
    next: Option<u32>,
}

impl PageSource {
    /// Creates a source positioned before the first page of `query`.
    #[must_use]
    pub fn new(gateway: Arc<dyn IssueGateway>, query: IssueQuery) -> Self {
        Self {
            gateway,
            query,
            next: Some(1),
        }
    }

    /// The query being paged.
    #[must_use]
    pub const fn query(&self) -> IssueQuery {
        self.query
    }

    /// Fetches the next page, or returns `None` once the sequence is over.
    pub async fn next_page(&mut self) -> Option<Result<FetchedPage, PageFetchError>> {
        let number = self.next.take()?;

        match self.gateway.list_issues(&self.query, number).await {
            Ok(page) => {
                debug!(
                    filter = %self.query.filter(),
                    page = number,
                    items = page.items.len(),
                    "fetched issues page"
                );
                self.next = page.page_info.next_page();
                Some(Ok(FetchedPage {
                    number,
                    items: page.items,
                }))
            }
            Err(error) => Some(Err(PageFetchError { number, error })),
        }
    }
}
