//! Per-event orchestration: resolve, cancel, re-issue, notify.
//!
//! One download-created event is handled start to finish by one task. The
//! only shared state it touches is the rule store snapshot, so concurrent
//! events never contend. Error posture per call: cancel and erase are
//! best-effort (log and continue), create is terminal for the event, the
//! notification is cosmetic either way.

use std::sync::Arc;
use std::time::Duration;

use crate::download::Download;
use crate::resolver;
use crate::rules::RuleStore;
use crate::services::{DownloadService, Notification, NotificationService};
use crate::template;

const NOTIFICATION_TITLE: &str = "Download Redirected";

/// What the interceptor did with one event. Side effects have already
/// happened by the time this is returned; the CLI and tests use it to report
/// or assert the decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// Event originated from this tool, or no rules are configured.
    Ignored,
    /// No rule selected the download; it proceeds untouched.
    NoMatch,
    /// Original cancelled and a new download issued at `target`.
    Redirected { target: String, new_id: i64 },
    /// A rule matched and the original was cancelled, but re-issuing failed.
    RedirectFailed { target: String },
}

/// Tunables owned by the embedding (sourced from config).
#[derive(Debug, Clone)]
pub struct InterceptorOptions {
    /// Icon name passed through to the notification service.
    pub notification_icon: String,
    /// How long the redirect notification stays up before auto-dismiss.
    pub notification_timeout: Duration,
}

impl Default for InterceptorOptions {
    fn default() -> Self {
        Self {
            notification_icon: "favicon.png".to_string(),
            notification_timeout: Duration::from_secs(3),
        }
    }
}

pub struct Interceptor {
    store: Arc<RuleStore>,
    downloads: Arc<dyn DownloadService>,
    notifier: Arc<dyn NotificationService>,
    options: InterceptorOptions,
}

impl Interceptor {
    pub fn new(
        store: Arc<RuleStore>,
        downloads: Arc<dyn DownloadService>,
        notifier: Arc<dyn NotificationService>,
        options: InterceptorOptions,
    ) -> Self {
        Self {
            store,
            downloads,
            notifier,
            options,
        }
    }

    /// Handle one download-created event.
    pub async fn handle(&self, download: &Download) -> InterceptOutcome {
        if download.by_extension {
            // Our own re-issued download coming back around.
            tracing::trace!(id = download.id, "ignoring self-initiated download");
            return InterceptOutcome::Ignored;
        }

        let rules = self.store.snapshot().await;
        if rules.is_empty() {
            tracing::debug!("no rules configured");
            return InterceptOutcome::Ignored;
        }

        let filename = download.bare_filename().to_string();
        let Some(matched) = resolver::resolve(&rules, download) else {
            tracing::debug!(url = %download.url, filename = %filename, "no matching rule");
            return InterceptOutcome::NoMatch;
        };
        tracing::info!(
            rule = %matched.rule.id,
            url = %download.url,
            filename = %filename,
            "rule matched"
        );

        // Best-effort teardown of the original transfer. Erasing the history
        // entry is cosmetic; a failure of either must not stop the redirect.
        if let Err(err) = self.downloads.cancel(download.id).await {
            tracing::warn!(id = download.id, %err, "failed to cancel original download");
        }
        if let Err(err) = self.downloads.erase_history(1).await {
            tracing::warn!(%err, "failed to erase history entry");
        }

        let target = template::render(&matched.rule.dir, &matched.groups, &filename);
        match self.downloads.create(&download.url, &target).await {
            Ok(new_id) => {
                tracing::info!(new_id, path = %target, "download redirected");
                self.notify_redirect(&filename, &target).await;
                InterceptOutcome::Redirected { target, new_id }
            }
            Err(err) => {
                tracing::error!(%err, path = %target, "failed to re-issue download");
                InterceptOutcome::RedirectFailed { target }
            }
        }
    }

    /// Show the redirect toast and schedule its auto-dismiss. Failures are
    /// swallowed; the redirect already happened.
    async fn notify_redirect(&self, filename: &str, target: &str) {
        let notification = Notification {
            icon: self.options.notification_icon.clone(),
            title: NOTIFICATION_TITLE.to_string(),
            message: format!("{filename}\n→ {target}"),
        };
        match self.notifier.create(notification).await {
            Ok(id) => {
                let notifier = Arc::clone(&self.notifier);
                let timeout = self.options.notification_timeout;
                tokio::spawn(async move {
                    tokio::time::sleep(timeout).await;
                    if let Err(err) = notifier.dismiss(&id).await {
                        tracing::debug!(%err, "failed to dismiss notification");
                    }
                });
            }
            Err(err) => tracing::debug!(%err, "failed to show notification"),
        }
    }
}
