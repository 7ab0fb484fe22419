//! Diagnostic logger collaborators for the event dispatcher.
//!
//! Logging is strictly best-effort: failure to resolve a logger, or any
//! problem inside one, must never affect dispatch. The traits here are
//! infallible on the call side; fallibility only exists at resolution
//! time and is absorbed by the dispatcher.

use std::sync::Arc;

use serde_json::Value;

/// A structured diagnostic logger.
pub trait EventLogger: Send + Sync {
    fn info(&self, message: &str, context: &Value);
    fn error(&self, message: &str, context: &Value);
}

/// Resolves a named logger. Resolution errors are absorbed by the
/// dispatcher, which then simply runs without a logger.
pub trait LoggerFactory: Send + Sync {
    fn get(
        &self,
        name: &str,
    ) -> Result<Arc<dyn EventLogger>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Default logger forwarding to the `tracing` subscriber.
pub struct TracingLogger;

impl EventLogger for TracingLogger {
    fn info(&self, message: &str, context: &Value) {
        tracing::info!(event = "core.events.diagnostic", context = %context, "{message}");
    }

    fn error(&self, message: &str, context: &Value) {
        tracing::error!(event = "core.events.diagnostic", context = %context, "{message}");
    }
}
