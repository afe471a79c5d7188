use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

use super::scanner::ScanError;
use super::split::SplitError;

/// Errors surfaced while building or exporting a few-shot dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Failed to create or write an export file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
