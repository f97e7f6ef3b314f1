use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BackupConfig;

pub const APP_TITLE: &str = "Borg Wrapper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BackupInitiated,
    BackupCompleted,
    BackupFailed,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackupInitiated => "backup.initiated",
            Self::BackupCompleted => "backup.completed",
            Self::BackupFailed => "backup.failed",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::BackupFailed)
    }

    /// Whether the config asks for this event to be shown.
    pub fn is_enabled(&self, config: &BackupConfig) -> bool {
        match self {
            Self::BackupInitiated => config.initiated_notifications,
            Self::BackupCompleted => config.completed_notifications,
            Self::BackupFailed => config.failed_notifications,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEvent {
    pub event_type: EventType,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl BackupEvent {
    pub fn new(event_type: EventType, label: impl Into<String>) -> Self {
        Self {
            event_type,
            label: label.into(),
            created_at: Utc::now(),
        }
    }

    pub fn body(&self) -> String {
        match self.event_type {
            EventType::BackupInitiated => format!("Backup “{}” initiated...", self.label),
            EventType::BackupCompleted => format!("Backup “{}” completed", self.label),
            EventType::BackupFailed => format!("Backup “{}” failed", self.label),
        }
    }
}

/// Data attached to a shown notification and handed back on click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl NotificationMetadata {
    pub fn for_log(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: Some(log_file.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub metadata: NotificationMetadata,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(body: impl Into<String>, metadata: NotificationMetadata) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: APP_TITLE.to_string(),
            body: body.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn from_event(event: &BackupEvent, config: &BackupConfig) -> Self {
        Self::new(
            event.body(),
            NotificationMetadata::for_log(config.log_file.clone()),
        )
    }
}
