//! The dispatch engine.
//!
//! [`Sender`] owns the collaborators a delivery needs: the channel
//! registry, the event dispatcher, queue defaults from configuration and
//! an optional queue driver. `send` decides between queueing, skipping
//! and synchronous delivery; `send_now` runs the channel loop.
//!
//! The channel loop never aborts early on failure. Every channel gets its
//! attempt and its events, the notification's hooks all run, and only
//! then is the first recorded failure returned to the caller.

pub mod errors;

use std::collections::HashMap;
use std::sync::Arc;

use herald_config::HeraldConfig;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::channels::errors::ChannelError;
use crate::channels::registry::ChannelRegistry;
use crate::errors::HeraldError;
use crate::events::dispatcher::EventDispatcher;
use crate::events::types::{FailedEvent, SendingEvent, SentEvent};
use crate::notification::traits::{Notifiable, Notification};
use crate::queue::{NotificationJob, QueueDriver};

pub use errors::SendError;

/// Outcome of a `send` call.
pub enum Dispatch {
    /// Handed to the queue driver with the resolved policy.
    Queued { queue: String, delay: u64, tries: u32 },
    /// `should_send` was false; nothing ran, no events fired. The
    /// notification is returned untouched.
    Skipped(Box<dyn Notification>),
    /// Delivered synchronously with no channel failures. The notification
    /// is returned for response inspection.
    Delivered(Box<dyn Notification>),
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Queued {
                queue,
                delay,
                tries,
            } => f
                .debug_struct("Queued")
                .field("queue", queue)
                .field("delay", delay)
                .field("tries", tries)
                .finish(),
            Dispatch::Skipped(n) => f.debug_tuple("Skipped").field(&n.kind()).finish(),
            Dispatch::Delivered(n) => f.debug_tuple("Delivered").field(&n.kind()).finish(),
        }
    }
}

pub struct Sender {
    channels: Arc<ChannelRegistry>,
    events: Arc<EventDispatcher>,
    queue_driver: Option<Arc<dyn QueueDriver>>,
    config: HeraldConfig,
}

impl Sender {
    pub fn new(
        channels: Arc<ChannelRegistry>,
        events: Arc<EventDispatcher>,
        config: HeraldConfig,
    ) -> Self {
        Self {
            channels,
            events,
            queue_driver: None,
            config,
        }
    }

    /// Build a sender with default collaborators: the built-in channel
    /// registry and an event dispatcher configured from `config.events`.
    pub fn from_config(config: HeraldConfig) -> Self {
        let events = Arc::new(EventDispatcher::from_config(&config.events));
        Self::new(Arc::new(ChannelRegistry::new()), events, config)
    }

    pub fn with_queue_driver(mut self, driver: Arc<dyn QueueDriver>) -> Self {
        self.queue_driver = Some(driver);
        self
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Dispatch a notification, deferring to the queue when the
    /// notification asks for it.
    ///
    /// Queue policy comes from the notification's overrides, falling back
    /// to configured defaults. Without a queue driver a queueable
    /// notification is delivered synchronously instead of being dropped.
    pub fn send(
        &self,
        notifiable: Arc<dyn Notifiable>,
        notification: Box<dyn Notification>,
    ) -> Result<Dispatch, SendError> {
        if notification.should_queue(notifiable.as_ref()) {
            if let Some(driver) = &self.queue_driver {
                let queue = notification
                    .queue_name()
                    .unwrap_or_else(|| self.config.queue.name().to_string());
                let delay = notification.delay().unwrap_or_else(|| self.config.queue.delay());
                let tries = notification.tries().unwrap_or_else(|| self.config.queue.tries());

                info!(
                    event = "core.sender.queued",
                    kind = notification.kind(),
                    notifiable = %notifiable.key(),
                    queue = %queue,
                    delay,
                    tries,
                );
                driver.push(
                    NotificationJob::new(notifiable, notification),
                    delay,
                    tries,
                    &queue,
                )?;
                return Ok(Dispatch::Queued {
                    queue,
                    delay,
                    tries,
                });
            }
            warn!(
                event = "core.sender.queue_driver_missing",
                kind = notification.kind(),
                "no queue driver configured, sending synchronously"
            );
        }

        if !notification.should_send(notifiable.as_ref()) {
            info!(
                event = "core.sender.send_skipped",
                kind = notification.kind(),
                notifiable = %notifiable.key(),
            );
            return Ok(Dispatch::Skipped(notification));
        }

        let mut notification = notification;
        self.send_now(notifiable.as_ref(), notification.as_mut())?;
        Ok(Dispatch::Delivered(notification))
    }

    /// Deliver synchronously on every channel `via` names that has not
    /// already been sent.
    ///
    /// A channel failure does not stop the loop: later channels are still
    /// attempted, all hooks run, and the first failure is returned at the
    /// end. Channels vetoed by a Sending listener are skipped without
    /// further events.
    pub fn send_now(
        &self,
        notifiable: &dyn Notifiable,
        notification: &mut dyn Notification,
    ) -> Result<(), SendError> {
        let id = notification.delivery_mut().ensure_id();

        let channels: Vec<String> = notification
            .via(notifiable)
            .into_iter()
            .filter(|channel| !notification.delivery().has_sent(channel))
            .collect();

        if channels.is_empty() {
            return Ok(());
        }

        info!(
            event = "core.sender.send_started",
            id = %id,
            kind = notification.kind(),
            notifiable = %notifiable.key(),
            channels = ?channels,
        );

        let mut responses: HashMap<String, Value> = HashMap::new();
        let mut first_failure: Option<ChannelError> = None;

        for channel_name in &channels {
            // Re-checked per iteration so a duplicate name in `via`
            // cannot deliver twice within one call
            if notification.delivery().has_sent(channel_name) {
                continue;
            }

            let should_send = {
                let mut event = SendingEvent::new(notifiable, &*notification, channel_name);
                self.events.dispatch_sending(&mut event)
            };
            if !should_send {
                info!(
                    event = "core.sender.channel_vetoed",
                    id = %id,
                    channel = %channel_name,
                );
                continue;
            }

            let outcome = match self.channels.get(channel_name) {
                Some(channel) => channel.send(notifiable, &*notification),
                None => Err(ChannelError::NotFound {
                    channel: channel_name.clone(),
                }),
            };

            match outcome {
                Ok(response) => {
                    notification.delivery_mut().mark_sent(channel_name);
                    {
                        let event =
                            SentEvent::new(notifiable, &*notification, channel_name, &response);
                        self.events.dispatch_sent(&event);
                    }
                    info!(
                        event = "core.sender.channel_sent",
                        id = %id,
                        channel = %channel_name,
                    );
                    responses.insert(channel_name.clone(), response);
                }
                Err(channel_error) => {
                    error!(
                        event = "core.sender.channel_failed",
                        id = %id,
                        channel = %channel_name,
                        code = channel_error.error_code(),
                        error = %channel_error,
                    );
                    {
                        let event =
                            FailedEvent::new(notifiable, &*notification, channel_name, &channel_error);
                        self.events.dispatch_failed(&event);
                    }
                    notification.failed(&channel_error);
                    if first_failure.is_none() {
                        first_failure = Some(channel_error);
                    }
                }
            }
        }

        // Post-send hooks fire once per channel; the processed set gates
        // repeated send_now calls on the same instance.
        let mut pending: Vec<(String, Value)> = Vec::new();
        for channel_name in &channels {
            if notification.delivery().is_processed(channel_name)
                || pending.iter().any(|(name, _)| name == channel_name)
            {
                continue;
            }
            if let Some(response) = responses.get(channel_name) {
                pending.push((channel_name.clone(), response.clone()));
            }
        }
        notification.delivery_mut().merge_responses(responses);

        for (channel_name, response) in pending {
            notification.after_channel_sent(&response, &channel_name, notifiable);
            notification.delivery_mut().mark_processed(&channel_name);
        }
        notification.after_send(notifiable);

        match first_failure {
            None => {
                info!(event = "core.sender.send_completed", id = %id);
                Ok(())
            }
            Some(channel_error) => Err(SendError::Channel(channel_error)),
        }
    }
}
