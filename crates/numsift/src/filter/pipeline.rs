//! Batched filter runs.
//!
//! A run walks the token list in fixed-size batches. After every batch it
//! reports a [`FilterProgress`] and, in the async driver, yields to the
//! scheduler so a host event loop stays responsive on large inputs.

use serde::{Deserialize, Serialize};

use super::config::{ConfigIssue, FilterConfig, FilterPlan};
use crate::error::{NumsiftError, Result};
use crate::export::ExportRow;
use crate::types::Token;
#[cfg(feature = "tokio-runtime")]
use crate::core::cancellation::CancellationToken;

/// Number of matches shown by [`FilterResult::preview`].
pub const PREVIEW_LIMIT: usize = 100;

/// Progress after one completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterProgress {
    /// `round(100 * completed_batches / total_batches)`, half rounding up
    pub percent: u8,
    pub completed_batches: usize,
    pub total_batches: usize,
    /// Matches accumulated so far
    pub matched: usize,
}

/// Integer percentage of `completed` out of `total`, rounding half up.
///
/// `total` must be non-zero.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    debug_assert!(total > 0);
    let percent = (200 * completed + total) / (2 * total);
    percent.min(100) as u8
}

/// Matching tokens of a completed run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub tokens: Vec<Token>,
    /// Number of tokens the run started with
    pub input_count: usize,
    /// Non-fatal configuration problems found before the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ConfigIssue>,
}

impl FilterResult {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The first [`PREVIEW_LIMIT`] matches.
    pub fn preview(&self) -> &[Token] {
        &self.tokens[..self.tokens.len().min(PREVIEW_LIMIT)]
    }

    /// One export row per matching token, with derived digit sums.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.tokens.iter().map(ExportRow::from_token).collect()
    }

    /// Human-readable summary, e.g. `Found 3 matching numbers out of 2500`.
    pub fn summary(&self) -> String {
        format!(
            "Found {} matching numbers out of {}",
            self.tokens.len(),
            self.input_count
        )
    }
}

/// How a run ended when it was not cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The input was empty; no batch ran and no progress was reported.
    NoTokens,
    Completed(FilterResult),
}

impl FilterOutcome {
    pub fn into_result(self) -> Option<FilterResult> {
        match self {
            FilterOutcome::NoTokens => None,
            FilterOutcome::Completed(result) => Some(result),
        }
    }
}

/// Stepwise filter run over a borrowed token list.
///
/// The configuration is compiled once in [`FilterTask::new`]; editing the
/// source [`FilterConfig`] afterwards has no effect on the task.
#[derive(Debug)]
pub struct FilterTask<'a> {
    tokens: &'a [Token],
    plan: FilterPlan,
    batch_size: usize,
    completed_batches: usize,
    total_batches: usize,
    matched: Vec<Token>,
}

impl<'a> FilterTask<'a> {
    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` if `batch_size` is zero or a digit
    /// preference is not a digit.
    pub fn new(tokens: &'a [Token], config: &FilterConfig, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(NumsiftError::validation("batch_size must be greater than zero"));
        }
        let plan = config.compile()?;

        Ok(Self {
            tokens,
            plan,
            batch_size,
            completed_batches: 0,
            total_batches: tokens.len().div_ceil(batch_size),
            matched: Vec::new(),
        })
    }

    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    pub fn completed_batches(&self) -> usize {
        self.completed_batches
    }

    pub fn is_finished(&self) -> bool {
        self.completed_batches >= self.total_batches
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        self.plan.issues()
    }

    /// Evaluate the next batch. Returns `None` once every batch has run.
    pub fn next_batch(&mut self) -> Option<FilterProgress> {
        if self.is_finished() {
            return None;
        }

        let start = self.completed_batches * self.batch_size;
        let end = (start + self.batch_size).min(self.tokens.len());
        let tokens = self.tokens;
        let batch = &tokens[start..end];

        if self.plan.is_unconstrained() {
            self.matched.extend_from_slice(batch);
        } else {
            self.matched
                .extend(batch.iter().filter(|token| self.plan.matches(token.as_str())).cloned());
        }
        self.completed_batches += 1;

        Some(FilterProgress {
            percent: progress_percent(self.completed_batches, self.total_batches),
            completed_batches: self.completed_batches,
            total_batches: self.total_batches,
            matched: self.matched.len(),
        })
    }

    /// Consume the task and return what matched so far.
    pub fn into_result(self) -> FilterResult {
        let issues = self.plan.issues().to_vec();
        FilterResult {
            tokens: self.matched,
            input_count: self.tokens.len(),
            issues,
        }
    }
}

/// Filter `tokens`, reporting progress after every batch and yielding to the
/// runtime between batches.
///
/// The cancellation token is checked before each batch; a cancelled run
/// returns `NumsiftError::Cancelled` and discards the partial result. A
/// cancellation that arrives after the last batch has no effect.
///
/// # Example
///
/// ```rust
/// use numsift::filter::{run_filter, FilterConfig, FilterOutcome};
/// use numsift::{CancellationToken, Token};
///
/// # #[tokio::main]
/// # async fn main() -> numsift::Result<()> {
/// let tokens: Vec<Token> = ["9876543210", "9999988888"]
///     .iter()
///     .filter_map(|s| Token::parse(s))
///     .collect();
/// let config = FilterConfig::new().with_search("999");
///
/// let outcome = run_filter(&tokens, &config, 1000, &CancellationToken::new(), |_| {}).await?;
/// let result = outcome.into_result().unwrap();
/// assert_eq!(result.tokens.len(), 1);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "tokio-runtime")]
pub async fn run_filter<F>(
    tokens: &[Token],
    config: &FilterConfig,
    batch_size: usize,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<FilterOutcome>
where
    F: FnMut(FilterProgress),
{
    if tokens.is_empty() {
        tracing::info!("No numbers to filter");
        return Ok(FilterOutcome::NoTokens);
    }

    let mut task = FilterTask::new(tokens, config, batch_size)?;
    tracing::debug!(
        tokens = tokens.len(),
        batches = task.total_batches(),
        active = ?config.active,
        "Starting filter run"
    );

    while !task.is_finished() {
        if cancel.is_cancelled() {
            return Err(NumsiftError::Cancelled(format!(
                "filter run stopped after {} of {} batches",
                task.completed_batches(),
                task.total_batches()
            )));
        }

        let Some(progress) = task.next_batch() else {
            break;
        };
        tracing::debug!(
            batch = progress.completed_batches,
            of = progress.total_batches,
            matched = progress.matched,
            "Filtered batch"
        );
        on_progress(progress);
        tokio::task::yield_now().await;
    }

    let result = task.into_result();
    tracing::info!("{}", result.summary());
    Ok(FilterOutcome::Completed(result))
}

/// Blocking counterpart of [`run_filter`] without cancellation or yielding.
pub fn run_filter_sync<F>(
    tokens: &[Token],
    config: &FilterConfig,
    batch_size: usize,
    mut on_progress: F,
) -> Result<FilterOutcome>
where
    F: FnMut(FilterProgress),
{
    if tokens.is_empty() {
        tracing::info!("No numbers to filter");
        return Ok(FilterOutcome::NoTokens);
    }

    let mut task = FilterTask::new(tokens, config, batch_size)?;
    while let Some(progress) = task.next_batch() {
        tracing::debug!(batch = progress.completed_batches, of = progress.total_batches, "Filtered batch");
        on_progress(progress);
    }

    let result = task.into_result();
    tracing::info!("{}", result.summary());
    Ok(FilterOutcome::Completed(result))
}
