use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{Result, WrapperError};

pub const DEFAULT_LABEL: &str = "default";
pub const DEFAULT_SCRIPT: &str = "/usr/local/bin/borg-backup.sh";
pub const DEFAULT_LOG_FILE: &str = "/usr/local/var/log/borg-backup.log";

/// Settings for a single backup run.
///
/// Every field is required in a config file; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    pub label: String,
    pub script: PathBuf,
    pub log_file: PathBuf,
    pub initiated_notifications: bool,
    pub completed_notifications: bool,
    pub failed_notifications: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            script: PathBuf::from(DEFAULT_SCRIPT),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            initiated_notifications: true,
            completed_notifications: true,
            failed_notifications: true,
        }
    }
}

impl BackupConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| WrapperError::invalid_config(path, e))?;
        let config = Self::from_json(&content).map_err(|e| match e {
            WrapperError::Json(e) => WrapperError::invalid_config(path, e),
            other => other,
        })?;
        debug!(path = %path.display(), label = %config.label, "Loaded config");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Where the configuration for this run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File(PathBuf),
}

impl ConfigSource {
    /// Only a first argument ending in `.json` selects a file.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        match args.first().map(AsRef::as_ref) {
            Some(arg) if arg.ends_with(".json") => Self::File(PathBuf::from(arg)),
            _ => Self::Default,
        }
    }

    pub async fn load(&self) -> Result<BackupConfig> {
        match self {
            Self::Default => Ok(BackupConfig::default()),
            Self::File(path) => BackupConfig::load(path).await,
        }
    }
}
