pub mod cli;
pub mod config;
pub mod error;
pub mod notification;
pub mod runner;
pub mod utils;

pub use config::{BackupConfig, ConfigSource};
pub use error::{Result, WrapperError};
pub use notification::{LaunchMode, Notifier};
pub use runner::{BackupOutcome, RunCoordinator, RunReport};
