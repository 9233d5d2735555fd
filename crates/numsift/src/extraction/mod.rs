//! Streaming token extraction.
//!
//! Sources of any size are read in bounded chunks and scanned with a
//! [`TokenScanner`], which keeps at most one partial field between reads. The
//! output is independent of the chunk size: a source that fits in one chunk and
//! the same source read one byte at a time produce identical token lists.
//!
//! A failed read aborts the extraction with [`NumsiftError::Io`]. Nothing is
//! retried and no partial result is returned. Rows that are not tokens are
//! discarded silently.
//!
//! # Example
//!
//! ```rust
//! use numsift::extraction::extract_bytes;
//!
//! # fn example() -> numsift::Result<()> {
//! let source = b"name,phone\nasha,9876543210\nravi,7123456789\n";
//! let result = extract_bytes(source, 8)?;
//! assert_eq!(result.tokens.len(), 2);
//! assert_eq!(result.tokens[0].as_str(), "9876543210");
//! # Ok(())
//! # }
//! ```

mod scanner;

pub use scanner::{DELIMITERS, TokenScanner};

use std::io::Read;
use std::path::Path;

use crate::core::config::NumsiftConfig;
use crate::error::{NumsiftError, Result};
use crate::types::ExtractionResult;
#[cfg(feature = "tokio-runtime")]
use crate::{core::cancellation::CancellationToken, types::ExtractionProgress};

fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(NumsiftError::validation("chunk_size must be greater than zero"));
    }
    Ok(())
}

/// Extract tokens from an in-memory source, scanning it `chunk_size` bytes at a time.
pub fn extract_bytes(source: &[u8], chunk_size: usize) -> Result<ExtractionResult> {
    check_chunk_size(chunk_size)?;

    let mut scanner = TokenScanner::new();
    for chunk in source.chunks(chunk_size) {
        scanner.feed(chunk);
    }
    Ok(scanner.finish())
}

/// Extract tokens from a blocking reader.
///
/// # Errors
///
/// Returns `NumsiftError::Io` on the first failed read.
/// Returns `NumsiftError::Validation` if `chunk_size` is zero.
pub fn extract_from_reader<R: Read>(mut reader: R, chunk_size: usize) -> Result<ExtractionResult> {
    check_chunk_size(chunk_size)?;

    let mut buffer = vec![0u8; chunk_size];
    let mut scanner = TokenScanner::new();

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(NumsiftError::Io(e)),
        };
        let accepted = scanner.feed(&buffer[..read]);
        tracing::debug!(bytes = read, accepted, "Scanned chunk");
    }

    let result = scanner.finish();
    tracing::debug!(
        tokens = result.tokens.len(),
        bytes = result.bytes_read,
        chunks = result.chunks_read,
        rejected = result.fields_rejected,
        "Extraction finished"
    );
    Ok(result)
}

/// Extract tokens from an async reader, yielding to the scheduler after every chunk.
///
/// `on_progress` is called once per chunk. The cancellation token is checked
/// before each read; a cancelled run returns `NumsiftError::Cancelled` and
/// discards everything scanned so far.
#[cfg(feature = "tokio-runtime")]
pub async fn extract_from_async_reader<R, F>(
    mut reader: R,
    chunk_size: usize,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<ExtractionResult>
where
    R: tokio::io::AsyncRead + Unpin,
    F: FnMut(ExtractionProgress),
{
    use tokio::io::AsyncReadExt;

    check_chunk_size(chunk_size)?;

    let mut buffer = vec![0u8; chunk_size];
    let mut scanner = TokenScanner::new();

    loop {
        if cancel.is_cancelled() {
            return Err(NumsiftError::Cancelled(format!(
                "extraction stopped after {} chunks",
                scanner.progress().chunks_read
            )));
        }

        let read = match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(NumsiftError::Io(e)),
        };
        scanner.feed(&buffer[..read]);

        on_progress(scanner.progress());
        tokio::task::yield_now().await;
    }

    let result = scanner.finish();
    tracing::debug!(
        tokens = result.tokens.len(),
        bytes = result.bytes_read,
        chunks = result.chunks_read,
        "Async extraction finished"
    );
    Ok(result)
}

/// Extract tokens from a file without blocking the async runtime.
#[cfg(feature = "tokio-runtime")]
#[tracing::instrument(skip(path, config, cancel), fields(path = %path.as_ref().display()))]
pub async fn extract_file(
    path: impl AsRef<Path>,
    config: &NumsiftConfig,
    cancel: &CancellationToken,
) -> Result<ExtractionResult> {
    config.validate()?;
    let path = path.as_ref();
    crate::core::io::validate_file_exists(path)?;

    let file = tokio::fs::File::open(path).await?;
    let result = extract_from_async_reader(file, config.chunk_size, cancel, |progress| {
        tracing::debug!(chunks = progress.chunks_read, tokens = progress.tokens_found, "Scanned chunk");
    })
    .await?;

    tracing::info!(tokens = result.tokens.len(), bytes = result.bytes_read, "Extracted numbers");
    Ok(result)
}

/// Blocking counterpart of [`extract_file`].
pub fn extract_file_sync(path: impl AsRef<Path>, config: &NumsiftConfig) -> Result<ExtractionResult> {
    config.validate()?;
    let path = path.as_ref();
    crate::core::io::validate_file_exists(path)?;

    let file = std::fs::File::open(path)?;
    let result = extract_from_reader(file, config.chunk_size)?;

    tracing::info!(tokens = result.tokens.len(), bytes = result.bytes_read, "Extracted numbers");
    Ok(result)
}
