//! Backup execution.
//!
//! - `BackupCommand`: the quoted `script | tee -a log` pipeline
//! - `RunCoordinator`: notify, run, report, truncate

mod command;
mod coordinator;

pub use command::{BackupCommand, CommandOutput, EXTRA_PATH_DIRS, SHELL, search_path};
pub use coordinator::{BackupOutcome, LOG_TAIL_LINES, OUTPUT_PREVIEW_LINES, RunCoordinator, RunReport};
