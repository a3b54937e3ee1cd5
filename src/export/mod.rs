//! Report serialization.
//!
//! A [`Report`] is flattened into [`ReportRow`]s and written as CSV or JSON
//! Lines. Rows keep the report's order: most recently updated first, ties
//! broken by link.

mod csv;
mod jsonl;
mod model;

use std::io::Write;

use crate::digest::Report;
use crate::github::IntakeError;

pub use csv::write_csv;
pub use jsonl::write_jsonl;
pub use model::{COLUMNS, ExportFormat, ReportRow, clickable};

/// Flattens `report` into rows.
#[must_use]
pub fn rows(report: &Report) -> Vec<ReportRow> {
    report.rows().iter().map(ReportRow::from).collect()
}

/// Writes `report` to `writer` in `format`.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if writing or serialization fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &Report,
    format: ExportFormat,
) -> Result<(), IntakeError> {
    let rows = rows(report);
    match format {
        ExportFormat::Csv => write_csv(writer, &rows),
        ExportFormat::Jsonl => write_jsonl(writer, &rows),
    }?;
    writer.flush().map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`IntakeError::Io`].
fn io_error(error: &std::io::Error) -> IntakeError {
    IntakeError::Io {
        message: error.to_string(),
    }
}
