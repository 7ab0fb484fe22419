//! Named pub/sub for the notification lifecycle events.
//!
//! Listener lists are ordered per event kind. The dispatcher carries a
//! global kill switch: when disabled, dispatching is a no-op and the
//! Sending result is always "should send" (fail-open, never blocks
//! delivery). Listener failures and logger problems are absorbed so that
//! observation can never break dispatch.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use herald_config::EventsConfig;
use serde_json::{Value, json};
use tracing::warn;

use crate::notification::traits::{Notifiable, Notification};

use super::logger::{EventLogger, LoggerFactory};
use super::redact;
use super::types::{EventKind, FailedEvent, SendingEvent, SentEvent};

/// Error type listeners may surface. Always absorbed and logged
/// best-effort; never propagated to the dispatching caller.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

type SendingListener =
    Arc<dyn for<'a> Fn(&mut SendingEvent<'a>) -> Result<bool, ListenerError> + Send + Sync>;
type SentListener = Arc<dyn for<'a> Fn(&SentEvent<'a>) -> Result<(), ListenerError> + Send + Sync>;
type FailedListener =
    Arc<dyn for<'a> Fn(&FailedEvent<'a>) -> Result<(), ListenerError> + Send + Sync>;

const LOGGER_NAME: &str = "notification";

pub struct EventDispatcher {
    sending: RwLock<Vec<SendingListener>>,
    sent: RwLock<Vec<SentListener>>,
    failed: RwLock<Vec<FailedListener>>,
    enabled: AtomicBool,
    log_events: bool,
    logger: RwLock<Option<Arc<dyn EventLogger>>>,
    factory: Option<Arc<dyn LoggerFactory>>,
}

impl EventDispatcher {
    pub fn new(enabled: bool) -> Self {
        Self {
            sending: RwLock::new(Vec::new()),
            sent: RwLock::new(Vec::new()),
            failed: RwLock::new(Vec::new()),
            enabled: AtomicBool::new(enabled),
            log_events: true,
            logger: RwLock::new(None),
            factory: None,
        }
    }

    pub fn from_config(config: &EventsConfig) -> Self {
        let mut dispatcher = Self::new(config.enabled());
        dispatcher.log_events = config.log_events();
        dispatcher
    }

    /// Attach a logger factory and attempt resolution if the dispatcher
    /// is enabled. Resolution failure is absorbed; the dispatcher then
    /// runs without a logger.
    pub fn with_logger_factory(mut self, factory: Arc<dyn LoggerFactory>) -> Self {
        self.factory = Some(factory);
        if self.is_enabled() {
            self.resolve_logger();
        }
        self
    }

    /// Set the logger directly, overriding any factory resolution.
    pub fn set_logger(&self, logger: Option<Arc<dyn EventLogger>>) {
        *self.logger.write().expect("event logger lock poisoned") = logger;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        // Enabling late still gets a logger if a factory can provide one
        if enabled && self.current_logger().is_none() {
            self.resolve_logger();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Append a listener for the Sending event. Listeners run in
    /// registration order; returning `Ok(false)` or calling the event's
    /// `prevent_sending` vetoes the channel delivery.
    pub fn on_sending<F>(&self, listener: F)
    where
        F: for<'a> Fn(&mut SendingEvent<'a>) -> Result<bool, ListenerError> + Send + Sync + 'static,
    {
        self.sending
            .write()
            .expect("listener list lock poisoned")
            .push(Arc::new(listener));
    }

    pub fn on_sent<F>(&self, listener: F)
    where
        F: for<'a> Fn(&SentEvent<'a>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.sent
            .write()
            .expect("listener list lock poisoned")
            .push(Arc::new(listener));
    }

    pub fn on_failed<F>(&self, listener: F)
    where
        F: for<'a> Fn(&FailedEvent<'a>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.failed
            .write()
            .expect("listener list lock poisoned")
            .push(Arc::new(listener));
    }

    /// Clear all listeners for one event kind.
    pub fn forget(&self, kind: EventKind) {
        match kind {
            EventKind::Sending => self
                .sending
                .write()
                .expect("listener list lock poisoned")
                .clear(),
            EventKind::Sent => self
                .sent
                .write()
                .expect("listener list lock poisoned")
                .clear(),
            EventKind::Failed => self
                .failed
                .write()
                .expect("listener list lock poisoned")
                .clear(),
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Sending => self.sending.read().expect("listener list lock poisoned").len(),
            EventKind::Sent => self.sent.read().expect("listener list lock poisoned").len(),
            EventKind::Failed => self.failed.read().expect("listener list lock poisoned").len(),
        }
    }

    /// Run Sending listeners and return the final should-send flag.
    ///
    /// Iteration stops at the first veto. A listener error neither vetoes
    /// nor stops iteration; it is logged and ignored. When the dispatcher
    /// is disabled this returns `true` without running anything.
    pub fn dispatch_sending(&self, event: &mut SendingEvent<'_>) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let listeners: Vec<SendingListener> = self
            .sending
            .read()
            .expect("listener list lock poisoned")
            .clone();

        for listener in listeners {
            if !event.should_send() {
                break;
            }
            match listener(event) {
                Ok(true) => {}
                Ok(false) => event.prevent_sending(),
                Err(e) => self.log_listener_error(EventKind::Sending, e),
            }
        }

        if self.log_events {
            let mut context = self.event_context(event.notifiable(), event.notification(), event.channel());
            context["should_send"] = json!(event.should_send());
            self.log_info("Notification sending", &context);
        }

        event.should_send()
    }

    /// Run all Sent listeners. No veto concept; errors are absorbed.
    pub fn dispatch_sent(&self, event: &SentEvent<'_>) {
        if !self.is_enabled() {
            return;
        }

        let listeners: Vec<SentListener> = self
            .sent
            .read()
            .expect("listener list lock poisoned")
            .clone();

        for listener in listeners {
            if let Err(e) = listener(event) {
                self.log_listener_error(EventKind::Sent, e);
            }
        }

        if self.log_events {
            let mut context = self.event_context(event.notifiable(), event.notification(), event.channel());
            context["successful"] = json!(event.was_successful());
            context["sent_at"] = json!(event.sent_at().to_rfc3339());
            self.log_info("Notification sent", &context);
        }
    }

    /// Run all Failed listeners. No veto concept; errors are absorbed.
    pub fn dispatch_failed(&self, event: &FailedEvent<'_>) {
        if !self.is_enabled() {
            return;
        }

        let listeners: Vec<FailedListener> = self
            .failed
            .read()
            .expect("listener list lock poisoned")
            .clone();

        for listener in listeners {
            if let Err(e) = listener(event) {
                self.log_listener_error(EventKind::Failed, e);
            }
        }

        if self.log_events {
            let mut context = self.event_context(event.notifiable(), event.notification(), event.channel());
            context["error"] = json!(event.error_message());
            context["code"] = json!(event.error_code());
            context["failed_at"] = json!(event.failed_at().to_rfc3339());
            self.log_error("Notification failed", &context);
        }
    }

    fn resolve_logger(&self) {
        let Some(factory) = &self.factory else {
            return;
        };
        match factory.get(LOGGER_NAME) {
            Ok(logger) => self.set_logger(Some(logger)),
            Err(e) => {
                // Logger resolution must never raise to the caller
                warn!(
                    event = "core.events.logger_resolution_failed",
                    error = %e,
                );
            }
        }
    }

    fn current_logger(&self) -> Option<Arc<dyn EventLogger>> {
        self.logger
            .read()
            .expect("event logger lock poisoned")
            .clone()
    }

    fn event_context(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
        channel: &str,
    ) -> Value {
        json!({
            "notifiable": {"key": notifiable.key()},
            "notification": notification.kind(),
            "channel": channel,
            "properties": Value::Object(redact::sanitize_map(&notification.loggable_properties())),
        })
    }

    fn log_info(&self, message: &str, context: &Value) {
        if let Some(logger) = self.current_logger() {
            logger.info(message, context);
        }
    }

    fn log_error(&self, message: &str, context: &Value) {
        if let Some(logger) = self.current_logger() {
            logger.error(message, context);
        }
    }

    fn log_listener_error(&self, kind: EventKind, error: ListenerError) {
        let context = json!({"event": kind.as_str(), "error": error.to_string()});
        match self.current_logger() {
            Some(logger) => logger.error("Event listener error", &context),
            None => warn!(
                event = "core.events.listener_error",
                kind = kind.as_str(),
                error = %error,
            ),
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(true)
    }
}
