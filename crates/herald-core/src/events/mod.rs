//! Notification lifecycle events.
//!
//! The dispatch engine fires a Sending event before each channel attempt
//! (listeners may veto), a Sent event after a successful attempt, and a
//! Failed event after an error. The [`EventDispatcher`] owns the listener
//! lists and an optional diagnostic logger whose payloads are redacted
//! through [`redact`].

pub mod dispatcher;
pub mod logger;
pub mod redact;
pub mod types;

pub use dispatcher::{EventDispatcher, ListenerError};
pub use logger::{EventLogger, LoggerFactory, TracingLogger};
pub use redact::SENSITIVE_SENTINEL;
pub use types::{EventKind, FailedEvent, SendingEvent, SentEvent};
