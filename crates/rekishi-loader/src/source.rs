//! Raw dataset transports.
//!
//! A [`DatasetSource`] only fetches text; parsing and staleness checks live in
//! [`crate::loader`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::LoadError;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const UTF8_BOM: &str = "\u{feff}";

/// Something that can produce the raw text of a dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location (path or URL) for logs and messages.
    fn location(&self) -> String;

    /// Fetch the full dataset text.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Decode fetched bytes, dropping a leading byte-order mark.
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, LoadError> {
    let text = String::from_utf8(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// A dataset stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<String, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode_utf8(bytes)
    }
}

/// A dataset served over HTTP(S).
pub struct HttpSource {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            timeout,
            client,
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout)
            } else if e.is_connect() {
                LoadError::Network(format!("{} not reachable: {e}", self.url))
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(LoadError::Http {
                status,
                url: self.url.clone(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout)
            } else {
                LoadError::Network(format!("failed to read response body: {e}"))
            }
        })?;

        decode_utf8(bytes.to_vec())
    }
}
