use std::sync::Arc;

use tracing::{debug, warn};

use super::{BackupEvent, Notification, NotificationBackend};
use crate::config::BackupConfig;
use crate::error::{Result, WrapperError};

#[derive(Clone)]
pub struct Notifier {
    backend: Arc<dyn NotificationBackend>,
}

impl Notifier {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self { backend }
    }

    /// Fails with `NotificationsDenied` unless the host allows notifications.
    pub async fn request_permission(&self) -> Result<()> {
        match self.backend.request_permission().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(WrapperError::NotificationsDenied),
            Err(e) => {
                warn!(error = %e, "Notification permission request failed");
                Err(WrapperError::NotificationsDenied)
            }
        }
    }

    /// Show the event if the config enables it. Delivery errors are logged only.
    pub async fn notify(&self, event: &BackupEvent, config: &BackupConfig) {
        if !event.event_type.is_enabled(config) {
            debug!(event = %event.event_type, "Notification disabled by config");
            return;
        }

        let notification = Notification::from_event(event, config);
        match self.backend.deliver(&notification).await {
            Ok(()) => debug!(id = %notification.id, event = %event.event_type, "Notification sent"),
            Err(e) => warn!(error = %e, event = %event.event_type, "Failed to send notification"),
        }
    }

    /// Block on the host alert until acknowledged. Failures are logged only.
    pub async fn alert(&self, message: &str) {
        if let Err(e) = self.backend.alert(message).await {
            warn!(error = %e, "Failed to show alert");
        }
    }
}
