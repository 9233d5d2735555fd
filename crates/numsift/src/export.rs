//! Export of filtered numbers with their derived digit sums.
//!
//! CSV output is a fixed three-column layout with `\n` line endings:
//!
//! ```text
//! Number,Digit Sum,Single Digit Sum
//! 6112345678,43,7
//! ```
//!
//! Every value is a plain digit string, so no field ever needs quoting.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{NumsiftError, Result};
use crate::patterns::{digit_sum, single_digit_sum};
use crate::types::Token;

/// Header line of the CSV export.
pub const CSV_HEADER: &str = "Number,Digit Sum,Single Digit Sum";

/// File name suggested for a CSV export.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "filtered_numbers.csv";

/// One exported number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub number: Token,
    pub digit_sum: u32,
    pub single_digit_sum: u32,
}

impl ExportRow {
    pub fn from_token(token: &Token) -> Self {
        Self {
            number: token.clone(),
            digit_sum: digit_sum(token.as_str()),
            single_digit_sum: single_digit_sum(token.as_str()),
        }
    }
}

fn ensure_rows(rows: &[ExportRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(NumsiftError::validation("no numbers to export"));
    }
    Ok(())
}

/// Write `rows` as CSV.
///
/// # Errors
///
/// Returns `NumsiftError::Validation` if `rows` is empty and
/// `NumsiftError::Io` if the writer fails.
pub fn write_csv<W: Write>(mut writer: W, rows: &[ExportRow]) -> Result<()> {
    ensure_rows(rows)?;

    writeln!(writer, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(writer, "{},{},{}", row.number, row.digit_sum, row.single_digit_sum)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render `rows` as a CSV string.
pub fn to_csv_string(rows: &[ExportRow]) -> Result<String> {
    let mut buffer = Vec::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 17);
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| NumsiftError::serialization_with_source("CSV output is not UTF-8", e))
}

/// Write `rows` as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut writer: W, rows: &[ExportRow]) -> Result<()> {
    ensure_rows(rows)?;

    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}
