use serde_json::{Map, Value};

use crate::channels::errors::ChannelError;

use super::delivery::Delivery;
use super::messages::Payload;

/// A recipient of notifications.
///
/// The dispatcher never inspects a recipient's concrete type; it only
/// asks for a channel-specific delivery address and a stable key.
pub trait Notifiable: Send + Sync {
    /// The delivery address for a channel (e.g. an email address for
    /// "mail"), or `None` if the recipient has no route for it.
    /// Channels that require a route fail with
    /// [`ChannelError::MissingRoute`] when this returns `None`.
    fn route_for(&self, channel: &str) -> Option<String>;

    /// A stable identifier for this recipient, used in logs and
    /// persisted records.
    fn key(&self) -> String;
}

/// The extensibility surface every concrete notification type implements.
///
/// `kind` and `via` are the only mandatory methods. Everything else
/// defaults to neutral behavior: empty payloads, queue-by-default, no-op
/// hooks.
///
/// Implementors embed a [`Delivery`] value and hand it out through
/// `delivery`/`delivery_mut`; the dispatch engine uses it to assign the
/// notification id, track sent channels, and collect channel responses.
pub trait Notification: Send {
    /// Stable type name for this notification (e.g. "welcome"). Used in
    /// diagnostic logs and persisted records.
    fn kind(&self) -> &str;

    /// The channels this notification should be delivered on, in order.
    fn via(&self, notifiable: &dyn Notifiable) -> Vec<String>;

    /// Build the payload for one channel.
    ///
    /// Channels call this with their own name; the default is an empty
    /// payload, which every built-in channel accepts.
    fn payload(&self, _channel: &str, _notifiable: &dyn Notifiable) -> Payload {
        Payload::Empty
    }

    /// Whether delivery should be deferred to the queue collaborator.
    fn should_queue(&self, _notifiable: &dyn Notifiable) -> bool {
        true
    }

    /// Whether the notification should be sent at all. Checked before
    /// queueing and re-checked inside the queued job before delivery.
    fn should_send(&self, _notifiable: &dyn Notifiable) -> bool {
        true
    }

    /// Queue name override. `None` falls back to the configured default.
    fn queue_name(&self) -> Option<String> {
        None
    }

    /// Delivery delay override in seconds.
    fn delay(&self) -> Option<u64> {
        None
    }

    /// Maximum attempt count override for the queue runner.
    fn tries(&self) -> Option<u32> {
        None
    }

    /// Called once per failed channel attempt inside the dispatch loop.
    fn failed(&mut self, _error: &ChannelError) {}

    /// Called after the channel loop and all per-channel hooks have run.
    fn after_send(&mut self, _notifiable: &dyn Notifiable) {}

    /// Called once per channel with that channel's response, after its
    /// Sent event has been dispatched. Gated by the processed set in
    /// [`Delivery`], so repeated `send_now` calls do not re-fire it.
    fn after_channel_sent(&mut self, _response: &Value, _channel: &str, _notifiable: &dyn Notifiable) {
    }

    /// Properties to include in diagnostic log entries. Values whose key
    /// names look sensitive are redacted before logging.
    fn loggable_properties(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Dispatch bookkeeping for this notification instance.
    fn delivery(&self) -> &Delivery;

    fn delivery_mut(&mut self) -> &mut Delivery;
}
