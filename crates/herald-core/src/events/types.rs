//! Lifecycle event records.
//!
//! One event is constructed per channel attempt inside the dispatch loop
//! and discarded after its listeners run. Events borrow the notification
//! and recipient; only [`SendingEvent`] carries mutable state (the veto
//! flag).

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::channels::errors::ChannelError;
use crate::errors::HeraldError;
use crate::notification::traits::{Notifiable, Notification};

/// The three lifecycle event kinds, used as listener list keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Sending,
    Sent,
    Failed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Sending => "notification.sending",
            EventKind::Sent => "notification.sent",
            EventKind::Failed => "notification.failed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fired before a channel is invoked. Listeners may veto the delivery.
pub struct SendingEvent<'a> {
    notifiable: &'a dyn Notifiable,
    notification: &'a dyn Notification,
    channel: &'a str,
    should_send: bool,
}

impl<'a> SendingEvent<'a> {
    pub fn new(
        notifiable: &'a dyn Notifiable,
        notification: &'a dyn Notification,
        channel: &'a str,
    ) -> Self {
        Self {
            notifiable,
            notification,
            channel,
            should_send: true,
        }
    }

    pub fn notifiable(&self) -> &dyn Notifiable {
        self.notifiable
    }

    pub fn notification(&self) -> &dyn Notification {
        self.notification
    }

    pub fn channel(&self) -> &str {
        self.channel
    }

    /// Veto delivery on this channel.
    pub fn prevent_sending(&mut self) {
        self.should_send = false;
    }

    pub fn should_send(&self) -> bool {
        self.should_send
    }
}

/// Fired after a channel delivered successfully.
pub struct SentEvent<'a> {
    notifiable: &'a dyn Notifiable,
    notification: &'a dyn Notification,
    channel: &'a str,
    response: &'a Value,
    sent_at: DateTime<Utc>,
}

impl<'a> SentEvent<'a> {
    pub fn new(
        notifiable: &'a dyn Notifiable,
        notification: &'a dyn Notification,
        channel: &'a str,
        response: &'a Value,
    ) -> Self {
        Self {
            notifiable,
            notification,
            channel,
            response,
            sent_at: Utc::now(),
        }
    }

    pub fn notifiable(&self) -> &dyn Notifiable {
        self.notifiable
    }

    pub fn notification(&self) -> &dyn Notification {
        self.notification
    }

    pub fn channel(&self) -> &str {
        self.channel
    }

    pub fn response(&self) -> &Value {
        self.response
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// A delivery counts as successful unless the channel returned
    /// nothing (null) or an explicit `false`.
    pub fn was_successful(&self) -> bool {
        !matches!(self.response, Value::Null | Value::Bool(false))
    }
}

/// Fired after a channel attempt failed.
pub struct FailedEvent<'a> {
    notifiable: &'a dyn Notifiable,
    notification: &'a dyn Notification,
    channel: &'a str,
    error: &'a ChannelError,
    failed_at: DateTime<Utc>,
}

impl<'a> FailedEvent<'a> {
    pub fn new(
        notifiable: &'a dyn Notifiable,
        notification: &'a dyn Notification,
        channel: &'a str,
        error: &'a ChannelError,
    ) -> Self {
        Self {
            notifiable,
            notification,
            channel,
            error,
            failed_at: Utc::now(),
        }
    }

    pub fn notifiable(&self) -> &dyn Notifiable {
        self.notifiable
    }

    pub fn notification(&self) -> &dyn Notification {
        self.notification
    }

    pub fn channel(&self) -> &str {
        self.channel
    }

    pub fn error(&self) -> &ChannelError {
        self.error
    }

    pub fn failed_at(&self) -> DateTime<Utc> {
        self.failed_at
    }

    pub fn error_message(&self) -> String {
        self.error.to_string()
    }

    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
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
            vec!["mail".to_string()]
        }

        fn delivery(&self) -> &Delivery {
            &self.delivery
        }

        fn delivery_mut(&mut self) -> &mut Delivery {
            &mut self.delivery
        }
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Sending.as_str(), "notification.sending");
        assert_eq!(EventKind::Sent.as_str(), "notification.sent");
        assert_eq!(EventKind::Failed.to_string(), "notification.failed");
    }

    #[test]
    fn test_sending_event_veto() {
        let notification = Ping {
            delivery: Delivery::default(),
        };
        let mut event = SendingEvent::new(&Recipient, &notification, "mail");
        assert!(event.should_send());
        event.prevent_sending();
        assert!(!event.should_send());
        assert_eq!(event.channel(), "mail");
    }

    #[test]
    fn test_sent_event_successful_for_payload_response() {
        let notification = Ping {
            delivery: Delivery::default(),
        };
        let response = json!({"ok": true});
        let event = SentEvent::new(&Recipient, &notification, "mail", &response);
        assert!(event.was_successful());
        assert_eq!(event.response(), &response);
    }

    #[test]
    fn test_sent_event_unsuccessful_for_null_and_false() {
        let notification = Ping {
            delivery: Delivery::default(),
        };
        let null = Value::Null;
        let event = SentEvent::new(&Recipient, &notification, "mail", &null);
        assert!(!event.was_successful());

        let falsy = json!(false);
        let event = SentEvent::new(&Recipient, &notification, "mail", &falsy);
        assert!(!event.was_successful());
    }

    #[test]
    fn test_failed_event_exposes_error_details() {
        let notification = Ping {
            delivery: Delivery::default(),
        };
        let error = ChannelError::NotFound {
            channel: "mail".to_string(),
        };
        let event = FailedEvent::new(&Recipient, &notification, "mail", &error);
        assert_eq!(event.error_message(), "Channel instance not found: mail");
        assert_eq!(event.error_code(), "CHANNEL_NOT_FOUND");
        assert_eq!(event.channel(), "mail");
    }
}
