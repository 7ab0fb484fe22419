//! Channel error types.

use crate::errors::HeraldError;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The registry has no binding for the requested channel name.
    /// Distinct from a channel's own delivery failure so logs and tests
    /// can tell a wiring mistake from a transport problem.
    #[error("Channel instance not found: {channel}")]
    NotFound { channel: String },

    #[error("Missing route for channel '{channel}': {message}")]
    MissingRoute { channel: String, message: String },

    #[error("Channel '{channel}' delivery failed: {message}")]
    DeliveryFailed { channel: String, message: String },
}

impl ChannelError {
    /// The channel name this error belongs to.
    pub fn channel(&self) -> &str {
        match self {
            ChannelError::NotFound { channel }
            | ChannelError::MissingRoute { channel, .. }
            | ChannelError::DeliveryFailed { channel, .. } => channel,
        }
    }
}

impl HeraldError for ChannelError {
    fn error_code(&self) -> &'static str {
        match self {
            ChannelError::NotFound { .. } => "CHANNEL_NOT_FOUND",
            ChannelError::MissingRoute { .. } => "CHANNEL_MISSING_ROUTE",
            ChannelError::DeliveryFailed { .. } => "CHANNEL_DELIVERY_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ChannelError::NotFound { .. } | ChannelError::MissingRoute { .. }
        )
    }
}
