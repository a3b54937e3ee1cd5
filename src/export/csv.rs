//! CSV formatter for report rows.
//!
//! Output follows RFC 4180: a header row, comma separators, and fields
//! quoted only when they contain a comma, a double quote, or a line break.

use std::io::Write;

use crate::github::IntakeError;

use super::io_error;
use super::model::{COLUMNS, ReportRow};

/// Writes a header row followed by one row per report row.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if writing to the output fails.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ReportRow]) -> Result<(), IntakeError> {
    write_record(writer, COLUMNS.iter().copied())?;
    for row in rows {
        let fields = row.fields();
        write_record(writer, fields.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_record<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> Result<(), IntakeError> {
    let line = fields.map(quote).collect::<Vec<_>>().join(",");
    write!(writer, "{line}\r\n").map_err(|e| io_error(&e))
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
