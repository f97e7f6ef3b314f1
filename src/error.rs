use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("Invalid config file {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Please allow notifications in System Preferences / Notifications")]
    NotificationsDenied,

    #[error("Notification delivery failed: {0}")]
    Notification(String),

    #[error("Failed to start backup command: {0}")]
    CommandSpawn(String),

    #[error("Log file error for {}: {message}", .path.display())]
    LogFile { path: PathBuf, message: String },

    #[error("Failed to open {} in the default viewer: {message}", .path.display())]
    Viewer { path: PathBuf, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WrapperError {
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WrapperError>;
