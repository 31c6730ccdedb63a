use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration, acquisition, and parsing failures.
///
/// A postal code that has no NUTS mapping is NOT an error: lookups report a
/// miss as `None` so that one unmatched code never aborts a batch run.
#[derive(Debug, Error)]
pub enum NutsError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid NUTS level {0}: must be 1, 2 or 3")]
    InvalidLevel(u8),
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("invalid NUTS archive {path}: {reason} (remove the cache entry and retry)")]
    Archive { path: PathBuf, reason: String },
    #[error("malformed NUTS table {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, NutsError>;
