use async_trait::async_trait;
use clap::ValueEnum;
use tracing::info;

use super::Notification;
use crate::error::Result;

/// Host side of notification display.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Ask the host whether notifications may be shown.
    async fn request_permission(&self) -> Result<bool>;

    /// Submit a notification. Returns once the host accepted the request.
    async fn deliver(&self, notification: &Notification) -> Result<()>;

    /// Show a blocking alert where the host supports one.
    async fn alert(&self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum BackendKind {
    /// Native desktop notifications
    #[default]
    Desktop,
    /// Write notifications to the log (headless hosts)
    Log,
}

/// Headless backend: notifications go to the tracing log.
#[derive(Debug, Clone, Default)]
pub struct LogBackend;

#[async_trait]
impl NotificationBackend for LogBackend {
    async fn request_permission(&self) -> Result<bool> {
        Ok(true)
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let log_file = notification
            .metadata
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        info!(
            id = %notification.id,
            title = %notification.title,
            log_file = %log_file,
            "{}",
            notification.body
        );
        Ok(())
    }

    async fn alert(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}
