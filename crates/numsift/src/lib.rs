//! numsift - Streaming extraction and filtering of 10-digit numbers
//!
//! numsift pulls every well-formed 10-digit number (first digit 6-9) out of
//! arbitrarily large delimited text, then filters the collection by digit
//! patterns, digit sums, digit preferences and "special" shapes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use numsift::{extract_file_sync, run_filter_sync, FilterConfig, NumsiftConfig};
//! use numsift::patterns::PatternKind;
//!
//! # fn main() -> numsift::Result<()> {
//! let config = NumsiftConfig::default();
//! let extracted = extract_file_sync("numbers.csv", &config)?;
//!
//! let filter = FilterConfig::new().with_pattern(PatternKind::Mirror);
//! let outcome = run_filter_sync(&extracted.tokens, &filter, config.batch_size, |p| {
//!     eprintln!("{}%", p.percent);
//! })?;
//!
//! if let Some(result) = outcome.into_result() {
//!     println!("{}", result.summary());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Extraction** (`extraction`): chunked scanning with boundary carry-over
//! - **Patterns** (`patterns`): pure digit predicates and derived sums
//! - **Filter** (`filter`): category selection and batched runs with progress
//! - **Export** (`export`): CSV/JSON rows with digit sums
//! - **Request** (`request`): validated search payload
//! - **Core** (`core`): configuration loading and cancellation

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod export;
pub mod extraction;
pub mod filter;
pub mod patterns;
pub mod request;
pub mod types;

pub use error::{NumsiftError, Result};
pub use types::{ExtractionProgress, ExtractionResult, Token, is_token_format};

pub use core::cancellation::CancellationToken;
pub use core::config::NumsiftConfig;

#[cfg(feature = "tokio-runtime")]
pub use extraction::{extract_file, extract_from_async_reader};
pub use extraction::{TokenScanner, extract_bytes, extract_file_sync, extract_from_reader};

#[cfg(feature = "tokio-runtime")]
pub use filter::run_filter;
pub use filter::{
    ConfigIssue, FilterCategory, FilterConfig, FilterOutcome, FilterProgress, FilterResult, FilterTask,
    run_filter_sync,
};

pub use export::{ExportRow, to_csv_string, write_csv, write_json};
pub use patterns::{PatternKind, SpecialKind};
pub use request::{SearchCategory, SearchRequest, SearchResponse};
