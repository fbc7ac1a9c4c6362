//! Tracing-backed notification service for headless embeddings.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::{Notification, NotificationService, ServiceError};

/// Emits notifications as log lines. Dismissal is a no-op beyond a debug log;
/// there is nothing on screen to take down.
#[derive(Default)]
pub struct LogNotifier {
    next_id: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationService for LogNotifier {
    async fn create(&self, notification: Notification) -> Result<String, ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            title = %notification.title,
            message = %notification.message,
            "notification"
        );
        Ok(format!("notification-{id}"))
    }

    async fn dismiss(&self, id: &str) -> Result<(), ServiceError> {
        tracing::debug!(id, "notification dismissed");
        Ok(())
    }
}
