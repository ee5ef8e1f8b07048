use crate::app::state::{Alert, Task};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOG_ENV: &str = "PORTAL_WIZARD_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogConfig,
    pub submission: SubmissionConfig,
    pub uploads: UploadConfig,
    pub seed: SeedData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    /// Interactive sessions log here; without it their logs are discarded.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub exhibit_prefix: String,
    pub discovery_prefix: String,
    pub request_prefix: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            exhibit_prefix: "EXH".to_string(),
            discovery_prefix: "DSC".to_string(),
            request_prefix: "REQ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub accept: Vec<String>,
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accept: ["*.pdf", "*.jpg", "*.jpeg", "*.png", "*.mp3", "*.mp4"]
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            max_files: 10,
        }
    }
}

/// Inline records the dashboard starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub tasks: Vec<Task>,
    pub alerts: Vec<Alert>,
}

impl AppConfig {
    /// Defaults, overlaid by the YAML file when one is given, then by the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(filter) = std::env::var(LOG_ENV) {
            config.log.filter = filter;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
