//! Backup configuration.
//!
//! - `BackupConfig`: the immutable settings for one run
//! - `ConfigSource`: picks the built-in defaults or a JSON file from the arguments

mod settings;

pub use settings::{BackupConfig, ConfigSource, DEFAULT_LABEL, DEFAULT_LOG_FILE, DEFAULT_SCRIPT};
