use std::sync::Arc;

use serde_json::Value;

use crate::notification::traits::{Notifiable, Notification};

use super::errors::ChannelError;

/// Trait defining the interface for delivery channels.
///
/// Each delivery mechanism (mail, database record, broadcast, SMS, ...)
/// implements this trait. The dispatcher treats the returned response as
/// opaque; its shape is channel-defined.
pub trait Channel: Send + Sync {
    /// The canonical name of this channel (e.g. "mail", "database").
    fn name(&self) -> &'static str;

    /// Deliver the notification to the recipient.
    ///
    /// Implementations look up their delivery target through
    /// [`Notifiable::route_for`] and build their payload through
    /// [`Notification::payload`]. Delivery runs synchronously from the
    /// dispatch loop's point of view; any internal concurrency is private
    /// to the channel.
    fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<Value, ChannelError>;
}

/// Optional container hook for resolving deferred channel bindings.
///
/// When the registry needs to instantiate a deferred binding, it
/// consults this factory first and falls back to the binding's own
/// constructor if the factory returns `None`.
pub trait ChannelFactory: Send + Sync {
    fn make(&self, name: &str) -> Option<Arc<dyn Channel>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::delivery::Delivery;
    use serde_json::json;

    struct Recipient;

    impl Notifiable for Recipient {
        fn route_for(&self, _channel: &str) -> Option<String> {
            None
        }

        fn key(&self) -> String {
            "user-1".to_string()
        }
    }

    struct Ping {
        delivery: Delivery,
    }

    impl Notification for Ping {
        fn kind(&self) -> &str {
            "ping"
        }

        fn via(&self, _notifiable: &dyn Notifiable) -> Vec<String> {
            vec!["mock".to_string()]
        }

        fn delivery(&self) -> &Delivery {
            &self.delivery
        }

        fn delivery_mut(&mut self) -> &mut Delivery {
            &mut self.delivery
        }
    }

    struct MockChannel;

    impl Channel for MockChannel {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn send(
            &self,
            _notifiable: &dyn Notifiable,
            notification: &dyn Notification,
        ) -> Result<Value, ChannelError> {
            Ok(json!({"kind": notification.kind()}))
        }
    }

    #[test]
    fn test_channel_send_returns_opaque_response() {
        let channel = MockChannel;
        let notification = Ping {
            delivery: Delivery::default(),
        };
        let response = channel.send(&Recipient, &notification).unwrap();
        assert_eq!(response, json!({"kind": "ping"}));
        assert_eq!(channel.name(), "mock");
    }
}
