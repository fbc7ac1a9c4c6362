//! Seams to the external download and notification subsystems.
//!
//! The engine never talks to a transfer stack directly; it asks a
//! [`DownloadService`] to cancel/erase/re-issue and a [`NotificationService`]
//! to show the redirect toast. Production embeddings supply the real service;
//! this crate ships a journal-backed service for the CLI watch loop and a
//! tracing-backed notifier.

mod journal;
mod log_notifier;

pub use journal::JournalDownloadService;
pub use log_notifier::LogNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of an external service call. The interceptor decides per call site
/// whether this is fatal for the event (create) or merely logged (the rest).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service rejected the request: {0}")]
    Rejected(String),
    #[error("service I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The notification payload; `kind` is always basic, mirroring the browser
/// notification surface the engine was written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub icon: String,
    pub title: String,
    pub message: String,
}

/// Download subsystem operations the interceptor consumes.
#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Cancel an in-flight transfer.
    async fn cancel(&self, id: i64) -> Result<(), ServiceError>;

    /// Erase the `limit` most recent history entries.
    async fn erase_history(&self, limit: u32) -> Result<(), ServiceError>;

    /// Start a new download of `url` saved at `destination`; returns the new
    /// download id.
    async fn create(&self, url: &str, destination: &str) -> Result<i64, ServiceError>;
}

/// Notification subsystem operations the interceptor consumes.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Show a notification; returns an id usable with [`Self::dismiss`].
    async fn create(&self, notification: Notification) -> Result<String, ServiceError>;

    /// Remove a previously created notification.
    async fn dismiss(&self, id: &str) -> Result<(), ServiceError>;
}
