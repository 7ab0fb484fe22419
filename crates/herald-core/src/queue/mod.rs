//! Background delivery handoff.
//!
//! The persistent queue itself lives behind [`QueueDriver`]; this module
//! only defines the handoff contract and the job that a worker runs when
//! the payload is picked back up. A job re-checks `should_send` at run
//! time because conditions may have changed between enqueue and pickup.

pub mod errors;

use std::sync::Arc;

use tracing::info;

use crate::notification::traits::{Notifiable, Notification};
use crate::sender::{SendError, Sender};

pub use errors::QueueError;

/// Accepts notification jobs for deferred delivery.
pub trait QueueDriver: Send + Sync {
    /// Push a job with its resolved policy. `delay` is in seconds and
    /// `tries` is the maximum attempt count the worker should honor.
    fn push(
        &self,
        job: NotificationJob,
        delay: u64,
        tries: u32,
        queue: &str,
    ) -> Result<(), QueueError>;
}

/// A queued unit of delivery: one notification for one recipient.
pub struct NotificationJob {
    notifiable: Arc<dyn Notifiable>,
    notification: Box<dyn Notification>,
}

impl NotificationJob {
    pub fn new(notifiable: Arc<dyn Notifiable>, notification: Box<dyn Notification>) -> Self {
        Self {
            notifiable,
            notification,
        }
    }

    pub fn kind(&self) -> &str {
        self.notification.kind()
    }

    pub fn notifiable_key(&self) -> String {
        self.notifiable.key()
    }

    /// Execute the delivery. Skips silently when `should_send` has turned
    /// false since enqueue. On failure the error propagates to the worker
    /// for retry accounting; per-channel `failed` hooks have already run
    /// inside the dispatch loop and are not invoked again here.
    pub fn run(mut self, sender: &Sender) -> Result<(), SendError> {
        if !self.notification.should_send(self.notifiable.as_ref()) {
            info!(
                event = "core.queue.job_skipped",
                kind = self.notification.kind(),
                notifiable = %self.notifiable.key(),
            );
            return Ok(());
        }

        info!(
            event = "core.queue.job_started",
            kind = self.notification.kind(),
            notifiable = %self.notifiable.key(),
        );
        sender.send_now(self.notifiable.as_ref(), self.notification.as_mut())
    }
}

impl std::fmt::Debug for NotificationJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationJob")
            .field("kind", &self.notification.kind())
            .field("notifiable", &self.notifiable.key())
            .finish()
    }
}
