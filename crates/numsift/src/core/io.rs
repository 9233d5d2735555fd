//! File I/O utilities.
//!
//! Path checks shared by the extraction entry points and the CLI.

use crate::{NumsiftError, Result};
use std::path::Path;

/// Check if a file exists.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Validate that a file exists.
///
/// # Errors
///
/// Returns `NumsiftError::Validation` if the path is missing or is not a regular file.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    if !file_exists(&path) {
        return Err(NumsiftError::validation(format!(
            "File does not exist: {}",
            path.as_ref().display()
        )));
    }
    Ok(())
}

/// True if the path carries a `.csv` extension (any case).
///
/// The engine reads any delimited text; callers use this to warn about
/// sources that are probably not number lists.
pub fn has_csv_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
