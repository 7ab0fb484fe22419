use thiserror::Error;

use crate::channels::errors::ChannelError;
use crate::errors::HeraldError;
use crate::queue::errors::QueueError;

/// Errors returned from the dispatch engine.
///
/// A `Channel` variant carries the first channel failure of a dispatch
/// loop; remaining channels were still attempted before it was returned.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl HeraldError for SendError {
    fn error_code(&self) -> &'static str {
        match self {
            SendError::Channel(e) => e.error_code(),
            SendError::Queue(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SendError::Channel(e) => e.is_user_error(),
            SendError::Queue(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegates_to_inner_error() {
        let err: SendError = ChannelError::NotFound {
            channel: "sms".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CHANNEL_NOT_FOUND");
        assert!(err.is_user_error());

        let err: SendError = QueueError::DriverUnavailable {
            message: "not configured".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "QUEUE_DRIVER_UNAVAILABLE");
        assert!(!err.is_user_error());
    }
}
