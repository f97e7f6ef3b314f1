//! Notification backend that records instead of displaying.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use borg_wrapper::error::{Result, WrapperError};
use borg_wrapper::notification::{Notification, NotificationBackend, Notifier};

#[derive(Default)]
pub struct RecordingBackend {
    deny_permission: bool,
    fail_delivery: bool,
    delivered: Mutex<Vec<Notification>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            deny_permission: true,
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_delivery: true,
            ..Default::default()
        })
    }

    pub fn notifier(self: &Arc<Self>) -> Notifier {
        Notifier::new(self.clone())
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.delivered().into_iter().map(|n| n.body).collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationBackend for RecordingBackend {
    async fn request_permission(&self) -> Result<bool> {
        Ok(!self.deny_permission)
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        self.delivered.lock().unwrap().push(notification.clone());
        if self.fail_delivery {
            return Err(WrapperError::Notification("display refused".into()));
        }
        Ok(())
    }

    async fn alert(&self, message: &str) -> Result<()> {
        self.alerts.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
