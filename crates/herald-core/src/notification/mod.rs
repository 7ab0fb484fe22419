//! Notification and recipient contracts.
//!
//! [`Notification`] is the extensibility surface concrete notification
//! types implement: channel selection, payload building, queueing policy,
//! and failure/post-send hooks. [`Notifiable`] is the narrow routing
//! contract recipients satisfy. [`Delivery`] carries the dispatch
//! bookkeeping the engine mutates while sending.

pub mod delivery;
pub mod messages;
pub mod policy;
pub mod traits;

pub use delivery::Delivery;
pub use messages::{DatabaseMessage, MailMessage, MessageLevel, Payload};
pub use policy::QueuePolicy;
pub use traits::{Notifiable, Notification};
