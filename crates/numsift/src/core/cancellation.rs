//! Cooperative cancellation for extraction and filter runs.
//!
//! Runs check the token at every chunk or batch boundary and stop with
//! [`NumsiftError::Cancelled`](crate::NumsiftError::Cancelled) once it is set.
//! Work already inside a chunk or batch always finishes first.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable flag shared between a host and an in-flight run.
///
/// # Example
///
/// ```rust
/// use numsift::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can drive another run.
    ///
    /// Only call this when no run is using the token.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
