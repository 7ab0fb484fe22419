//! Per-notification dispatch bookkeeping.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

/// Mutable dispatch state embedded in every notification instance.
///
/// Tracks the lazily assigned id, which channels have already been
/// delivered (so retries never re-deliver), each channel's raw response,
/// and which channels the post-send hook has already processed.
#[derive(Debug, Clone, Default)]
pub struct Delivery {
    id: Option<Uuid>,
    sent_channels: Vec<String>,
    responses: HashMap<String, Value>,
    processed: Vec<String>,
}

impl Delivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the notification id if unassigned and return it.
    ///
    /// The id is assigned at most once per instance; repeated calls
    /// return the same value.
    pub fn ensure_id(&mut self) -> Uuid {
        *self.id.get_or_insert_with(Uuid::new_v4)
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Channels already delivered, in delivery order.
    pub fn sent_channels(&self) -> &[String] {
        &self.sent_channels
    }

    pub fn has_sent(&self, channel: &str) -> bool {
        self.sent_channels.iter().any(|c| c == channel)
    }

    /// Record a successful delivery. A channel name appears at most once.
    pub fn mark_sent(&mut self, channel: &str) {
        if !self.has_sent(channel) {
            self.sent_channels.push(channel.to_string());
        }
    }

    pub fn response(&self, channel: &str) -> Option<&Value> {
        self.responses.get(channel)
    }

    pub fn responses(&self) -> &HashMap<String, Value> {
        &self.responses
    }

    /// Merge newly collected responses into the response map.
    ///
    /// Later calls augment prior responses rather than replacing the map,
    /// so a retried `send_now` keeps what earlier invocations recorded.
    pub fn merge_responses(&mut self, responses: HashMap<String, Value>) {
        self.responses.extend(responses);
    }

    pub fn is_processed(&self, channel: &str) -> bool {
        self.processed.iter().any(|c| c == channel)
    }

    /// Mark a channel's post-send hook as having run.
    pub fn mark_processed(&mut self, channel: &str) {
        if !self.is_processed(channel) {
            self.processed.push(channel.to_string());
        }
    }
}
