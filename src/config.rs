//! TOML settings for a split run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{DEFAULT_VAL_FRACTION, SemanticNames, SplitOptions};

const DEFAULT_SHOTS: usize = 16;

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize settings to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
}

/// Settings for scanning and splitting one dataset root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub dataset_dir: PathBuf,
    #[serde(default = "default_shots")]
    pub shots: usize,
    #[serde(default = "default_val_fraction")]
    pub val_fraction: f64,
    /// Fixed shuffle seed; absent means a fresh seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Extra `identifier = "description"` pairs layered over the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_file: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub builtin_names: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::new(),
            shots: DEFAULT_SHOTS,
            val_fraction: DEFAULT_VAL_FRACTION,
            seed: None,
            names_file: None,
            builtin_names: true,
        }
    }
}

impl SplitConfig {
    /// Load settings from `path`, resolving relative paths against its folder.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SplitConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(base))
    }

    /// Write settings to `path` as TOML.
    ///
    /// Relative paths are resolved against the working directory and written
    /// out absolute.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let absolute = self.absolutized().map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let text = toml::to_string_pretty(&absolute).map_err(|source| ConfigError::SerializeToml {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            shots: self.shots,
            val_fraction: self.val_fraction,
        }
    }

    /// Built-in identifiers (when enabled) overlaid with `names_file` entries.
    pub fn semantic_names(&self) -> Result<SemanticNames, ConfigError> {
        let base = if self.builtin_names {
            SemanticNames::builtin()
        } else {
            SemanticNames::default()
        };
        match &self.names_file {
            Some(path) => Ok(base.merged(SemanticNames::load_toml(path)?)),
            None => Ok(base),
        }
    }

    fn absolutized(&self) -> std::io::Result<Self> {
        let mut config = self.clone();
        if !config.dataset_dir.as_os_str().is_empty() {
            config.dataset_dir = std::path::absolute(&config.dataset_dir)?;
        }
        if let Some(names_file) = &config.names_file {
            config.names_file = Some(std::path::absolute(names_file)?);
        }
        Ok(config)
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        if !self.dataset_dir.as_os_str().is_empty() && self.dataset_dir.is_relative() {
            self.dataset_dir = base.join(&self.dataset_dir);
        }
        if let Some(names_file) = self.names_file.take() {
            self.names_file = Some(if names_file.is_relative() {
                base.join(names_file)
            } else {
                names_file
            });
        }
        self
    }
}

fn default_shots() -> usize {
    DEFAULT_SHOTS
}

fn default_val_fraction() -> f64 {
    DEFAULT_VAL_FRACTION
}

fn default_true() -> bool {
    true
}
