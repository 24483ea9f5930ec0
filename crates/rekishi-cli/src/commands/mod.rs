//! Subcommand implementations and the loading steps they share.

pub mod eras;
pub mod init;
pub mod play;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use rekishi_core::parser::RowPolicy;
use rekishi_loader::{load_config_from, DatasetLoader, LoadedDataset, QuizConfig, SourceConfig};

/// Load the config file and apply command-line overrides.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    dataset: Option<String>,
    skip_malformed: bool,
) -> Result<QuizConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(location) = dataset {
        config.source = SourceConfig::from_location(&location);
    }
    if skip_malformed {
        config.row_policy = RowPolicy::Skip;
    }
    tracing::debug!(
        source = %config.source.location(),
        row_policy = ?config.row_policy,
        max_options = config.max_options,
        "resolved configuration"
    );
    Ok(config)
}

/// Fetch and parse the configured dataset.
pub async fn load_dataset(config: &QuizConfig) -> Result<LoadedDataset> {
    let source = config
        .source
        .build()
        .with_context(|| format!("failed to open dataset source {}", config.source.location()))?;
    let loader = DatasetLoader::new(source).with_row_policy(config.row_policy);
    let loaded = loader
        .load()
        .await
        .with_context(|| format!("failed to load dataset from {}", loader.source_location()))?;
    Ok(loaded)
}
