//! Core run plumbing.
//!
//! - **Configuration**: Loading and discovering `NumsiftConfig`
//! - **I/O**: File validation helpers
//! - **Cancellation**: The token checked at every chunk and batch boundary

pub mod cancellation;
pub mod config;
pub mod io;

pub use cancellation::CancellationToken;
pub use config::NumsiftConfig;
