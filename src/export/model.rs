//! Report rows and output format selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::digest::{Classification, WorkItem};
use crate::github::IntakeError;

/// Column names, in output order.
pub const COLUMNS: [&str; 10] = [
    "number",
    "title",
    "link",
    "repository",
    "repo_name",
    "repo_url",
    "created_at",
    "updated_at",
    "pull_request",
    "filter",
];

/// One flattened report row.
///
/// `title` and `repository` hold anchor markup so the report renders as
/// clickable labels when opened in a spreadsheet or HTML viewer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    /// Issue or pull request number.
    pub number: u64,
    /// Title as an anchor over `link`.
    pub title: String,
    /// Browser URL of the item.
    pub link: String,
    /// Repository name as an anchor over `repo_url`.
    pub repository: String,
    /// Repository in `owner/name` form.
    pub repo_name: String,
    /// Browser URL of the repository.
    pub repo_url: String,
    /// Creation timestamp (RFC 3339, UTC).
    pub created_at: String,
    /// Last update timestamp (RFC 3339, UTC).
    pub updated_at: String,
    /// Whether the item is a pull request.
    pub pull_request: bool,
    /// Classification label.
    pub filter: Classification,
}

impl ReportRow {
    /// Returns the row's fields as text, in [`COLUMNS`] order.
    #[must_use]
    pub fn fields(&self) -> [String; 10] {
        [
            self.number.to_string(),
            self.title.clone(),
            self.link.clone(),
            self.repository.clone(),
            self.repo_name.clone(),
            self.repo_url.clone(),
            self.created_at.clone(),
            self.updated_at.clone(),
            self.pull_request.to_string(),
            self.filter.as_str().to_owned(),
        ]
    }
}

impl From<&WorkItem> for ReportRow {
    fn from(item: &WorkItem) -> Self {
        Self {
            number: item.number(),
            title: clickable(item.link(), item.title()),
            link: item.link().to_owned(),
            repository: clickable(item.repo_url(), item.repo_name()),
            repo_name: item.repo_name().to_owned(),
            repo_url: item.repo_url().to_owned(),
            created_at: timestamp(item.created_at()),
            updated_at: timestamp(item.updated_at()),
            pull_request: item.is_pull_request(),
            filter: item.classification(),
        }
    }
}

/// Wraps `label` in an anchor pointing at `url`, escaping both.
#[must_use]
pub fn clickable(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" rel="noopener noreferrer" target="_blank">{}</a>"#,
        escape_html(url),
        escape_html(label)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Machine-readable JSON Lines (one object per line).
    Jsonl,
}

impl FromStr for ExportFormat {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "json-lines" | "jsonlines" => Ok(Self::Jsonl),
            _ => Err(IntakeError::Configuration {
                message: format!(
                    "unsupported report format '{s}': valid options are 'csv' or 'jsonl'"
                ),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}
