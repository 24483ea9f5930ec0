//! rekishi-loader: getting datasets into the quiz engine.
//!
//! Provides the file and HTTP dataset sources, the `rekishi.toml`
//! configuration, and a loader that fetches, parses and discards results
//! overtaken by a newer load.

pub mod config;
pub mod error;
pub mod loader;
pub mod mock;
pub mod source;

pub use config::{load_config, load_config_from, QuizConfig, SourceConfig};
pub use error::LoadError;
pub use loader::{DatasetLoader, LoadedDataset};
pub use source::{DatasetSource, FileSource, HttpSource};
