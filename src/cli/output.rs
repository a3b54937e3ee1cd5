//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use github_activity::IntakeError;

/// Writes the one-line run summary to the given writer.
pub fn write_run_summary<W: Write>(
    writer: &mut W,
    rows: usize,
    path: &str,
    skipped: usize,
) -> Result<(), IntakeError> {
    let noun = if rows == 1 { "item" } else { "items" };
    writeln!(writer, "Wrote {rows} {noun} to {path} ({skipped} skipped)")
        .map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`IntakeError::Io`].
pub fn io_error(error: &io::Error) -> IntakeError {
    IntakeError::Io {
        message: error.to_string(),
    }
}
