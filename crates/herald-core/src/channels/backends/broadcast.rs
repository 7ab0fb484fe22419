//! Built-in broadcast channel.
//!
//! Publishes the notification's `Record` payload on a per-recipient
//! broadcast channel name. The pub/sub transport itself (Redis,
//! WebSocket, ...) is a collaborator concern; this adapter produces the
//! envelope the transport would carry.

use chrono::Utc;
use serde_json::{Value, json};
use tracing::debug;

use crate::channels::errors::ChannelError;
use crate::channels::traits::Channel;
use crate::notification::messages::Payload;
use crate::notification::traits::{Notifiable, Notification};

pub struct BroadcastChannel;

impl BroadcastChannel {
    pub fn new() -> Self {
        Self
    }

    /// Broadcast channel name for a recipient: their explicit broadcast
    /// route when present, otherwise `notifiable.<key>`.
    fn channel_name(notifiable: &dyn Notifiable) -> String {
        notifiable
            .route_for("broadcast")
            .unwrap_or_else(|| format!("notifiable.{}", notifiable.key()))
    }
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for BroadcastChannel {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<Value, ChannelError> {
        let data = match notification.payload("broadcast", notifiable) {
            Payload::Record(value) => value,
            _ => json!({}),
        };

        let channel_name = Self::channel_name(notifiable);

        debug!(
            event = "core.channels.broadcast_published",
            channel = %channel_name,
            kind = notification.kind(),
        );

        Ok(json!({
            "success": true,
            "channel": channel_name,
            "event": notification.kind(),
            "data": data,
            "broadcast_at": Utc::now().to_rfc3339(),
        }))
    }
}
