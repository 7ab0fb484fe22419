//! Built-in channel backends: thin adapters for the default bindings.

mod broadcast;
mod database;
mod mail;

pub use broadcast::BroadcastChannel;
pub use database::DatabaseChannel;
pub use mail::MailChannel;
