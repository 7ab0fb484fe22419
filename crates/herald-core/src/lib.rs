//! herald-core: Multi-channel notification dispatch
//!
//! This library delivers notifications to recipients over pluggable
//! channels (mail, database, broadcast, or custom backends), with
//! lifecycle events, queue handoff, and per-notification delivery state.
//!
//! # Main Entry Points
//!
//! - [`sender`] - Dispatch engine (`send`, `send_now`)
//! - [`channels`] - Channel trait, registry, built-in backends
//! - [`events`] - Lifecycle events and listeners
//! - [`notification`] - The `Notification`/`Notifiable` traits and
//!   message builders

pub mod channels;
pub mod errors;
pub mod events;
pub mod logging;
pub mod notification;
pub mod queue;
pub mod sender;

pub use channels::backends::{BroadcastChannel, DatabaseChannel, MailChannel};
pub use channels::{Channel, ChannelError, ChannelFactory, ChannelRegistry};
pub use errors::{HeraldError, HeraldResult};
pub use events::{
    EventDispatcher, EventKind, EventLogger, FailedEvent, LoggerFactory, SendingEvent, SentEvent,
};
pub use notification::delivery::Delivery;
pub use notification::messages::{DatabaseMessage, MailMessage, MessageLevel, Payload};
pub use notification::policy::QueuePolicy;
pub use notification::traits::{Notifiable, Notification};
pub use queue::{NotificationJob, QueueDriver, QueueError};
pub use sender::{Dispatch, SendError, Sender};

// Re-export config types from herald-config
pub use herald_config::{ConfigError, EventsConfig, HeraldConfig, QueueConfig};
