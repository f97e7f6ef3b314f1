use tokio::fs;
use tracing::{debug, info, warn};

use super::command::BackupCommand;
use crate::config::BackupConfig;
use crate::notification::{BackupEvent, EventType, Notifier};
use crate::utils::{tail_lines, truncate_to_last_lines};

/// Lines kept in the log file after a successful run.
pub const LOG_TAIL_LINES: usize = 1000;

/// Lines of script output echoed at debug level and shown after a failure.
pub const OUTPUT_PREVIEW_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Succeeded,
    /// `code` is `None` when the shell could not start or was killed.
    Failed { code: Option<i32> },
}

impl BackupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: BackupOutcome,
    pub output: String,
    pub log_truncated: bool,
}

impl RunReport {
    /// Last lines of the script output when the run failed and printed anything.
    pub fn failure_excerpt(&self) -> Option<&str> {
        if self.outcome.is_success() {
            return None;
        }
        let tail = tail_lines(&self.output, OUTPUT_PREVIEW_LINES).trim_end();
        (!tail.is_empty()).then_some(tail)
    }
}

/// Runs one backup attempt and reports each step through the notifier.
pub struct RunCoordinator {
    config: BackupConfig,
    notifier: Notifier,
}

impl RunCoordinator {
    pub fn new(config: BackupConfig, notifier: Notifier) -> Self {
        Self { config, notifier }
    }

    pub async fn run(&self) -> RunReport {
        info!(
            label = %self.config.label,
            script = %self.config.script.display(),
            log_file = %self.config.log_file.display(),
            "Starting backup"
        );

        self.emit(EventType::BackupInitiated).await;
        self.prepare_log_dir().await;

        let (outcome, output) = match BackupCommand::new(&self.config).execute().await {
            Ok(result) if result.success() => (BackupOutcome::Succeeded, result.output),
            Ok(result) => (BackupOutcome::Failed { code: result.code }, result.output),
            Err(e) => {
                warn!(error = %e, "Backup command did not run");
                (BackupOutcome::Failed { code: None }, String::new())
            }
        };

        debug!(
            lines = output.lines().count(),
            tail = %tail_lines(&output, OUTPUT_PREVIEW_LINES).trim_end(),
            "Backup output"
        );

        let log_truncated = match outcome {
            BackupOutcome::Succeeded => {
                info!(label = %self.config.label, "Backup completed");
                self.emit(EventType::BackupCompleted).await;
                self.truncate_log().await
            }
            BackupOutcome::Failed { code } => {
                warn!(label = %self.config.label, code = ?code, "Backup failed");
                self.emit(EventType::BackupFailed).await;
                false
            }
        };

        RunReport {
            outcome,
            output,
            log_truncated,
        }
    }

    async fn emit(&self, event_type: EventType) {
        let event = BackupEvent::new(event_type, &self.config.label);
        self.notifier.notify(&event, &self.config).await;
    }

    async fn prepare_log_dir(&self) {
        let Some(dir) = self.config.log_file.parent() else {
            return;
        };
        if dir.as_os_str().is_empty() || fs::try_exists(dir).await.unwrap_or(false) {
            return;
        }
        if let Err(e) = fs::create_dir_all(dir).await {
            warn!(error = %e, dir = %dir.display(), "Failed to create log directory");
        }
    }

    /// Best effort; returns whether the log now holds at most `LOG_TAIL_LINES` lines.
    async fn truncate_log(&self) -> bool {
        match truncate_to_last_lines(&self.config.log_file, LOG_TAIL_LINES).await {
            Ok(stats) => {
                debug!(
                    removed_bytes = stats.removed_bytes,
                    kept_bytes = stats.kept_bytes,
                    "Truncated log file"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to truncate log file");
                false
            }
        }
    }
}
