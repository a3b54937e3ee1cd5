//! The aggregation pipeline: page through each query, classify items on
//! concurrent page workers, and reconcile the results into a report.
//!
//! Data flows one way: [`QueryDriver`] owns a [`PageSource`] and a [`FanOut`]
//! per query, the fan-out runs an [`ItemClassifier`] per page (which consults
//! the [`ReviewerResolver`] for `repos` pull requests), and [`reconcile`]
//! turns the driver's [`DigestRun`] into a [`Report`].

pub mod classifier;
pub mod driver;
pub mod fanout;
pub mod model;
pub mod page_source;
pub mod reconcile;
pub mod reviewers;
pub mod skipped;

pub use classifier::{Classified, ItemClassifier, PageRecords};
pub use driver::{DigestRun, QueryDriver, collect_activity};
pub use fanout::{FanOut, QueryOutcome};
pub use model::{Classification, QUERIES, Report, WorkItem};
pub use page_source::{FetchedPage, PageFetchError, PageSource};
pub use reconcile::{precedence, reconcile};
pub use reviewers::{ReviewerResolver, ReviewerStatus};
pub use skipped::Skipped;
