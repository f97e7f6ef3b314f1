//! Backup event notifications.
//!
//! - `BackupEvent`, `Notification`: what is shown and the metadata attached to it
//! - `Notifier`: permission gate, fire-and-forget delivery, blocking alerts
//! - `DesktopBackend`, `LogBackend`: host implementations of `NotificationBackend`
//! - `handle_click`: opens the log file of a clicked notification

mod activation;
mod backend;
mod desktop;
mod events;
mod notifier;

pub use activation::{ClickOutcome, LaunchMode, LogViewer, SystemViewer, handle_click};
pub use backend::{BackendKind, LogBackend, NotificationBackend};
pub use desktop::{DesktopBackend, DesktopTool, OPEN_LOG_FLAG};
pub use events::{APP_TITLE, BackupEvent, EventType, Notification, NotificationMetadata};
pub use notifier::Notifier;
