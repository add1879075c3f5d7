//! Dashboard configuration.
//! Read from an optional JSON file; anything left out falls back to defaults.

use crate::data::{LoadOptions, DEFAULT_ENCODING, DEFAULT_INFER_SCHEMA_LENGTH};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Sales file read when the config does not name one.
pub const DEFAULT_DATA_PATH: &str = "sales_data.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub encoding: String,
    pub infer_schema_length: usize,
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            encoding: DEFAULT_ENCODING.to_string(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load the config at `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            encoding: self.encoding.clone(),
            infer_schema_length: self.infer_schema_length,
        }
    }
}
