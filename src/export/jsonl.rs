//! JSONL (JSON Lines) formatter for report rows.

use std::io::Write;

use crate::github::IntakeError;

use super::io_error;
use super::model::ReportRow;

/// Writes rows in JSONL format to the given writer.
///
/// Each row is serialized as a single JSON object on its own line.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if writing to the output fails, or if
/// JSON serialization fails.
pub fn write_jsonl<W: Write>(writer: &mut W, rows: &[ReportRow]) -> Result<(), IntakeError> {
    for row in rows {
        serde_json::to_writer(&mut *writer, row).map_err(|e| IntakeError::Io {
            message: format!("JSON serialization failed: {e}"),
        })?;
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}
