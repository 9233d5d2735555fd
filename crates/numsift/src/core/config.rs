//! Configuration loading and management.
//!
//! This module provides utilities for loading run configuration from TOML, YAML
//! or JSON files and for discovering a `numsift.toml` in the directory hierarchy.

use crate::filter::FilterConfig;
use crate::{NumsiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of bytes read per extraction chunk (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default number of tokens evaluated per filter batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// File name searched for by [`NumsiftConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "numsift.toml";

/// Main run configuration.
///
/// # Example
///
/// ```rust
/// use numsift::core::config::NumsiftConfig;
///
/// let config = NumsiftConfig::default();
/// assert_eq!(config.batch_size, 1000);
///
/// // Load from TOML file
/// // let config = NumsiftConfig::from_toml_file("numsift.toml")?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumsiftConfig {
    /// Bytes read from the source per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Tokens evaluated per filter batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Filter selection applied by `numsift filter` and `run_filter`
    #[serde(default)]
    pub filter: FilterConfig,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for NumsiftConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            filter: FilterConfig::default(),
        }
    }
}

impl NumsiftConfig {
    /// Reject sizes that would make a run impossible.
    ///
    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` if `chunk_size` or `batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(NumsiftError::validation("chunk_size must be greater than zero"));
        }
        if self.batch_size == 0 {
            return Err(NumsiftError::validation("batch_size must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `NumsiftError::Validation` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| NumsiftError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| NumsiftError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| NumsiftError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognised; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `numsift.toml` in the current directory and its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(NumsiftError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| NumsiftError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
