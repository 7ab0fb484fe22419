//! Built-in mail channel.
//!
//! A thin adapter: it resolves the recipient's mail route, renders the
//! [`MailMessage`](crate::notification::messages::MailMessage) payload,
//! and reports the delivery. Actual transport (SMTP, API relay) is a
//! collaborator concern wired in by the application.

use serde_json::{Value, json};
use tracing::debug;

use crate::channels::errors::ChannelError;
use crate::channels::traits::Channel;
use crate::notification::messages::{MailMessage, Payload};
use crate::notification::traits::{Notifiable, Notification};

pub struct MailChannel;

impl MailChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MailChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for MailChannel {
    fn name(&self) -> &'static str {
        "mail"
    }

    fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<Value, ChannelError> {
        let recipient =
            notifiable
                .route_for("mail")
                .ok_or_else(|| ChannelError::MissingRoute {
                    channel: "mail".to_string(),
                    message: "recipient has no email address".to_string(),
                })?;

        let message = match notification.payload("mail", notifiable) {
            Payload::Mail(message) => message,
            _ => MailMessage::new(),
        };

        debug!(
            event = "core.channels.mail_sent",
            recipient = %recipient,
            subject = ?message.subject,
        );

        Ok(json!({
            "success": true,
            "recipient": recipient,
            "subject": message.subject,
            "level": message.level.to_string(),
        }))
    }
}
