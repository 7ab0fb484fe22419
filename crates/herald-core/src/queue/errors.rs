use thiserror::Error;

use crate::errors::HeraldError;

/// Errors surfaced by queue drivers when accepting a job.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue driver unavailable: {message}")]
    DriverUnavailable { message: String },

    #[error("Failed to push job onto queue '{queue}': {message}")]
    PushFailed { queue: String, message: String },
}

impl HeraldError for QueueError {
    fn error_code(&self) -> &'static str {
        match self {
            QueueError::DriverUnavailable { .. } => "QUEUE_DRIVER_UNAVAILABLE",
            QueueError::PushFailed { .. } => "QUEUE_PUSH_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        false
    }
}
