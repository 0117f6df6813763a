use crate::{
    database::ContactRepository,
    error::Result,
    models::StoredContact,
    notify::{NotifyError, NotifyResult, TelegramNotifier},
    validation::validate_submission,
};
use serde_json::{Map, Value};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn, Instrument};

/// Runs a submission through validation, storage and notification.
///
/// Background notifications are spawned on a shared [`TaskTracker`] so
/// shutdown can wait for them with [`ContactService::drain_notifications`].
#[derive(Clone)]
pub struct ContactService {
    repository: ContactRepository,
    notifier: TelegramNotifier,
    background: TaskTracker,
}

impl ContactService {
    pub fn new(repository: ContactRepository, notifier: TelegramNotifier) -> Self {
        Self {
            repository,
            notifier,
            background: TaskTracker::new(),
        }
    }

    pub fn repository(&self) -> &ContactRepository {
        &self.repository
    }

    pub fn notifier(&self) -> &TelegramNotifier {
        &self.notifier
    }

    /// Number of background notifications still in flight.
    pub fn pending_notifications(&self) -> usize {
        self.background.len()
    }

    /// Closes the tracker and waits for in-flight notifications.
    /// Each task is bounded by the notifier timeout.
    pub async fn drain_notifications(&self) {
        self.background.close();
        let pending = self.background.len();
        if pending > 0 {
            info!(pending, "Waiting for background notifications");
        }
        self.background.wait().await;
    }

    /// Validation and storage errors end the pipeline. The notification
    /// outcome is only logged.
    pub async fn submit(&self, payload: &Map<String, Value>) -> Result<StoredContact> {
        let submission = validate_submission(payload)?;

        let id = self.repository.insert(&submission).await?;
        info!(contact_id = id, "Stored contact submission");

        let contact = StoredContact { id, submission };

        if self.notifier.wait_for_delivery() {
            let outcome = self.notifier.notify_submission(&contact).await;
            log_notify_outcome(id, &outcome);
        } else {
            let notifier = self.notifier.clone();
            let stored = contact.clone();
            self.background.spawn(
                async move {
                    let outcome = notifier.notify_submission(&stored).await;
                    log_notify_outcome(stored.id, &outcome);
                }
                .in_current_span(),
            );
        }

        Ok(contact)
    }
}

fn log_notify_outcome(contact_id: i64, outcome: &NotifyResult<()>) {
    match outcome {
        Ok(()) => info!(contact_id, "Operator notified"),
        Err(NotifyError::NotConfigured) => {
            debug!(contact_id, "Notifier not configured, skipping")
        }
        Err(e) => warn!(contact_id, error = %e, "Failed to notify operator"),
    }
}
