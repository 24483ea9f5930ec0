//! Dataset load error types.

use std::path::PathBuf;
use std::time::Duration;

use rekishi_core::ParseError;
use thiserror::Error;

/// Errors that can occur while fetching and parsing a dataset.
///
/// None of these leave a partial dataset behind: a load either yields a
/// complete dataset or one of these errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a local file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request timed out.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },

    /// The fetched bytes are not valid UTF-8.
    #[error("dataset is not valid UTF-8: {0}")]
    Decode(String),

    /// The text was fetched but is not a valid dataset.
    #[error("invalid dataset: {0}")]
    Parse(#[from] ParseError),

    /// A later load was started before this one finished; its result was discarded.
    #[error("load #{ticket} superseded by load #{latest}")]
    Superseded { ticket: u64, latest: u64 },
}

impl LoadError {
    /// Returns `true` for the error a stale load reports.
    pub fn is_superseded(&self) -> bool {
        matches!(self, LoadError::Superseded { .. })
    }

    /// Returns `true` if retrying the same load may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LoadError::Timeout(_) | LoadError::Network(_) => true,
            LoadError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
