//! Batched token filtering.
//!
//! A [`FilterConfig`] selects any combination of five categories: search,
//! pattern, digit sum, digit preferences and special type. A token passes when
//! it satisfies every active category, and the output keeps input order.
//!
//! # Example
//!
//! ```rust
//! use numsift::filter::{run_filter_sync, FilterConfig};
//! use numsift::patterns::PatternKind;
//! use numsift::Token;
//!
//! # fn example() -> numsift::Result<()> {
//! let tokens: Vec<Token> = ["9876543210", "9123443219", "8000000001"]
//!     .iter()
//!     .filter_map(|s| Token::parse(s))
//!     .collect();
//!
//! let config = FilterConfig::new().with_pattern(PatternKind::Mirror);
//! let outcome = run_filter_sync(&tokens, &config, 1000, |progress| {
//!     println!("{}%", progress.percent);
//! })?;
//!
//! let result = outcome.into_result().unwrap();
//! assert_eq!(result.tokens[0].as_str(), "9123443219");
//! # Ok(())
//! # }
//! ```

mod config;
mod pipeline;

pub use config::{ConfigIssue, DEFAULT_ENDING, FilterCategory, FilterConfig, FilterPlan};
#[cfg(feature = "tokio-runtime")]
pub use pipeline::run_filter;
pub use pipeline::{
    FilterOutcome, FilterProgress, FilterResult, FilterTask, PREVIEW_LIMIT, progress_percent, run_filter_sync,
};
