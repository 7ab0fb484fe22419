//! Tracing initialization for applications embedding the dispatcher.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initialize structured JSON logging.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`
/// (e.g. `RUST_LOG=herald_core=debug`). Calling this twice panics, so it
/// belongs in the application's entry point, not in library code.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer().json().with_target(false);

    tracing_subscriber::registry().with(filter).with(layer).init();
}
