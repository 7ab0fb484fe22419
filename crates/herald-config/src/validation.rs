//! Configuration validation.

use crate::errors::ConfigError;
use crate::types::HeraldConfig;

/// Validate the final merged configuration.
///
/// Catches values that would make the dispatcher misbehave at runtime:
/// an empty queue name would route jobs nowhere, and zero tries would
/// drop every queued notification without an attempt.
pub fn validate_config(config: &HeraldConfig) -> Result<(), ConfigError> {
    if let Some(name) = &config.queue.name
        && name.trim().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "queue.name must not be empty".to_string(),
        });
    }

    if let Some(tries) = config.queue.tries
        && tries == 0
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "queue.tries must be at least 1".to_string(),
        });
    }

    Ok(())
}
