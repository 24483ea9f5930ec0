//! Quiz configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rekishi_core::options::DEFAULT_MAX_OPTIONS;
use rekishi_core::parser::RowPolicy;
use rekishi_core::SessionConfig;

use crate::error::LoadError;
use crate::source::{DatasetSource, FileSource, HttpSource, DEFAULT_TIMEOUT_SECS};

/// Environment variable that overrides the configured dataset location.
pub const DATASET_ENV: &str = "REKISHI_DATASET";

/// Where the dataset text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SourceConfig {
    /// Interpret a path or `http(s)://` URL.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceConfig::Http {
                url: location.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        } else {
            SourceConfig::File {
                path: PathBuf::from(location),
            }
        }
    }

    pub fn location(&self) -> String {
        match self {
            SourceConfig::File { path } => path.display().to_string(),
            SourceConfig::Http { url, .. } => url.clone(),
        }
    }

    /// Create the source this configuration describes.
    pub fn build(&self) -> Result<Arc<dyn DatasetSource>, LoadError> {
        match self {
            SourceConfig::File { path } => Ok(Arc::new(FileSource::new(path.clone()))),
            SourceConfig::Http { url, timeout_secs } => Ok(Arc::new(HttpSource::new(
                url,
                Duration::from_secs(*timeout_secs),
            )?)),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: PathBuf::from("data/sample.csv"),
        }
    }
}

/// Top-level rekishi configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Dataset location.
    #[serde(default)]
    pub source: SourceConfig,
    /// Handling of rows whose field count does not match the header.
    #[serde(default)]
    pub row_policy: RowPolicy,
    /// Options shown per answer field, correct value included.
    #[serde(default = "default_max_options")]
    pub max_options: usize,
    /// Eras to quiz on; empty means all.
    #[serde(default)]
    pub eras: Vec<String>,
    /// Fixed seed for reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_options() -> usize {
    DEFAULT_MAX_OPTIONS
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            row_policy: RowPolicy::default(),
            max_options: default_max_options(),
            eras: Vec::new(),
            seed: None,
        }
    }
}

impl QuizConfig {
    /// Session settings derived from this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_options: self.max_options,
            eras: self.eras.iter().cloned().collect(),
            seed: self.seed,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Expansion is a single left-to-right pass: substituted values are copied
/// verbatim and never expanded again. An unterminated `${` is kept as is.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_source(source: &SourceConfig) -> SourceConfig {
    match source {
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        SourceConfig::Http { url, timeout_secs } => SourceConfig::Http {
            url: resolve_env_vars(url),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `rekishi.toml` in the current directory
/// 2. `~/.config/rekishi/config.toml`
///
/// `REKISHI_DATASET` replaces the configured source when set.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => default_config_paths().into_iter().find(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizConfig::default(),
    };

    if let Ok(location) = std::env::var(DATASET_ENV) {
        if !location.trim().is_empty() {
            config.source = SourceConfig::from_location(&location);
        }
    }

    config.source = resolve_source(&config.source);
    anyhow::ensure!(config.max_options >= 1, "max_options must be at least 1");

    Ok(config)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("rekishi.toml")];
    if let Ok(home) = std::env::var("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("rekishi")
                .join("config.toml"),
        );
    }
    paths
}
