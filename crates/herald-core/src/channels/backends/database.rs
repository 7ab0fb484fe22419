//! Built-in database channel.
//!
//! Builds a persistable record from the notification's `Record` payload
//! and returns it as the channel response. Writing the record to an
//! actual store is a collaborator concern; applications that persist
//! notifications register their own channel wrapping this record shape.

use chrono::Utc;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::channels::errors::ChannelError;
use crate::channels::traits::Channel;
use crate::notification::messages::Payload;
use crate::notification::traits::{Notifiable, Notification};

pub struct DatabaseChannel;

impl DatabaseChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DatabaseChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for DatabaseChannel {
    fn name(&self) -> &'static str {
        "database"
    }

    fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<Value, ChannelError> {
        let data = match notification.payload("database", notifiable) {
            Payload::Record(value) => value,
            Payload::Mail(message) => serde_json::to_value(message).unwrap_or(Value::Null),
            Payload::Empty => json!({}),
        };

        let record = json!({
            "id": Uuid::new_v4().to_string(),
            "kind": notification.kind(),
            "notifiable_key": notifiable.key(),
            "data": data,
            "created_at": Utc::now().to_rfc3339(),
        });

        debug!(
            event = "core.channels.database_record_built",
            kind = notification.kind(),
            notifiable = %notifiable.key(),
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::delivery::Delivery;

    struct Recipient;

    impl Notifiable for Recipient {
        fn route_for(&self, _channel: &str) -> Option<String> {
            None
        }

        fn key(&self) -> String {
            "user-7".to_string()
        }
    }

    struct OrderShipped {
        delivery: Delivery,
    }

    impl Notification for OrderShipped {
        fn kind(&self) -> &str {
            "order_shipped"
        }

        fn via(&self, _notifiable: &dyn Notifiable) -> Vec<String> {
            vec!["database".to_string()]
        }

        fn payload(&self, channel: &str, _notifiable: &dyn Notifiable) -> Payload {
            match channel {
                "database" => Payload::Record(json!({"order_id": 42})),
                _ => Payload::Empty,
            }
        }

        fn delivery(&self) -> &Delivery {
            &self.delivery
        }

        fn delivery_mut(&mut self) -> &mut Delivery {
            &mut self.delivery
        }
    }

    #[test]
    fn test_database_channel_builds_record() {
        let channel = DatabaseChannel::new();
        let notification = OrderShipped {
            delivery: Delivery::default(),
        };
        let record = channel.send(&Recipient, &notification).unwrap();
        assert_eq!(record["kind"], "order_shipped");
        assert_eq!(record["notifiable_key"], "user-7");
        assert_eq!(record["data"], json!({"order_id": 42}));
        assert!(record["id"].as_str().is_some());
        assert!(record["created_at"].as_str().is_some());
    }

    #[test]
    fn test_database_channel_does_not_require_route() {
        let channel = DatabaseChannel::new();
        let notification = OrderShipped {
            delivery: Delivery::default(),
        };
        assert!(channel.send(&Recipient, &notification).is_ok());
    }

    #[test]
    fn test_database_channel_empty_payload_yields_empty_data() {
        struct Bare {
            delivery: Delivery,
        }

        impl Notification for Bare {
            fn kind(&self) -> &str {
                "bare"
            }

            fn via(&self, _notifiable: &dyn Notifiable) -> Vec<String> {
                vec!["database".to_string()]
            }

            fn delivery(&self) -> &Delivery {
                &self.delivery
            }

            fn delivery_mut(&mut self) -> &mut Delivery {
                &mut self.delivery
            }
        }

        let channel = DatabaseChannel::new();
        let notification = Bare {
            delivery: Delivery::default(),
        };
        let record = channel.send(&Recipient, &notification).unwrap();
        assert_eq!(record["data"], json!({}));
    }
}
