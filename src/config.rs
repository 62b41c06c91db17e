//! Runtime settings for the console shell.
//!
//! Every field has a default, so an empty (or absent) TOML file yields
//! [`LibraryConfig::default`].

use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patron::DEFAULT_BORROW_LIMIT;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`LibraryConfig`]
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable records
    #[default]
    Compact,
    /// One JSON object per record
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level for this crate's records (`RUST_LOG` takes precedence)
    pub level: String,
    /// Record format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Borrowing limit given to patrons registered through the shell
    pub default_borrow_limit: NonZeroUsize,
    /// Whether the shell starts with the sample books and patrons
    pub seed_sample_data: bool,
    /// Logging settings
    pub log: LogConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_borrow_limit: DEFAULT_BORROW_LIMIT,
            seed_sample_data: true,
            log: LogConfig::default(),
        }
    }
}

impl LibraryConfig {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not valid TOML or a value
    /// is out of range (for example a borrowing limit of zero).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}
