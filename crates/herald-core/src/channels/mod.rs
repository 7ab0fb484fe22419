//! Delivery channels and their registry.
//!
//! A [`Channel`] is a pluggable delivery mechanism invoked by the dispatch
//! engine through a uniform interface. The [`ChannelRegistry`] maps channel
//! names to instances or deferred constructors, with mail/database/broadcast
//! registered as built-ins.

pub mod backends;
pub mod errors;
pub mod registry;
pub mod traits;

pub use errors::ChannelError;
pub use registry::{ChannelCtor, ChannelRegistry};
pub use traits::{Channel, ChannelFactory};
