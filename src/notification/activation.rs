use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::NotificationMetadata;
use crate::error::{Result, WrapperError};

/// How the process was started. Decided once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    Normal,
    /// Started by a click on a notification shown by an earlier run.
    NotificationActivation(NotificationMetadata),
}

impl LaunchMode {
    pub fn from_open_log(open_log: Option<PathBuf>) -> Self {
        match open_log {
            Some(path) => Self::NotificationActivation(NotificationMetadata::for_log(path)),
            None => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Keep going; the current run is unaffected.
    Continue,
    /// The process only existed to handle the click.
    Terminate,
}

#[async_trait]
pub trait LogViewer: Send + Sync {
    async fn open(&self, path: &Path) -> Result<()>;
}

/// Opens files with the platform's default application.
#[derive(Debug, Clone, Default)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

#[async_trait]
impl LogViewer for SystemViewer {
    async fn open(&self, path: &Path) -> Result<()> {
        let output = Self::command(path)
            .output()
            .await
            .map_err(|e| WrapperError::Viewer {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(WrapperError::Viewer {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Open the clicked notification's log file, then decide whether to exit.
pub async fn handle_click(
    metadata: &NotificationMetadata,
    mode: &LaunchMode,
    viewer: &dyn LogViewer,
) -> ClickOutcome {
    match &metadata.log_file {
        Some(log_file) => {
            info!(path = %log_file.display(), "Opening log file from notification");
            if let Err(e) = viewer.open(log_file).await {
                warn!(error = %e, "Failed to open log file");
            }
        }
        None => debug!("Clicked notification has no log file"),
    }

    match mode {
        LaunchMode::NotificationActivation(_) => ClickOutcome::Terminate,
        LaunchMode::Normal => ClickOutcome::Continue,
    }
}
