//! Configuration types for the notification dispatcher.
//!
//! All fields are optional in the TOML representation; accessor methods
//! return the built-in defaults when a field is unset. This keeps partial
//! config files valid and makes merging straightforward.

use serde::{Deserialize, Serialize};

/// Default queue name used when no override is configured.
pub const DEFAULT_QUEUE_NAME: &str = "notifications";

/// Default number of delivery attempts for queued notifications.
pub const DEFAULT_QUEUE_TRIES: u32 = 3;

/// Top-level configuration for the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

/// Queue hand-off defaults. Notifications may override each field
/// individually; these values apply when they do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Target queue name. Defaults to "notifications".
    pub name: Option<String>,
    /// Delivery delay in seconds. Defaults to 0.
    pub delay: Option<u64>,
    /// Maximum delivery attempts. Defaults to 3.
    pub tries: Option<u32>,
}

impl QueueConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_QUEUE_NAME)
    }

    pub fn delay(&self) -> u64 {
        self.delay.unwrap_or(0)
    }

    pub fn tries(&self) -> u32 {
        self.tries.unwrap_or(DEFAULT_QUEUE_TRIES)
    }
}

/// Lifecycle event settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Global kill switch for the event dispatcher. Defaults to true.
    pub enabled: Option<bool>,
    /// Whether dispatched events are written to the diagnostic log.
    /// Defaults to true.
    pub log_events: Option<bool>,
}

impl EventsConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn log_events(&self) -> bool {
        self.log_events.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.name(), "notifications");
        assert_eq!(config.delay(), 0);
        assert_eq!(config.tries(), 3);
    }

    #[test]
    fn test_queue_overrides() {
        let config = QueueConfig {
            name: Some("urgent".to_string()),
            delay: Some(30),
            tries: Some(5),
        };
        assert_eq!(config.name(), "urgent");
        assert_eq!(config.delay(), 30);
        assert_eq!(config.tries(), 5);
    }

    #[test]
    fn test_events_defaults() {
        let config = EventsConfig::default();
        assert!(config.enabled());
        assert!(config.log_events());
    }

    #[test]
    fn test_events_disabled() {
        let config = EventsConfig {
            enabled: Some(false),
            log_events: Some(false),
        };
        assert!(!config.enabled());
        assert!(!config.log_events());
    }

    #[test]
    fn test_partial_toml_parses() {
        let config: HeraldConfig = toml::from_str("[queue]\nname = \"mailers\"").unwrap();
        assert_eq!(config.queue.name(), "mailers");
        assert_eq!(config.queue.tries(), 3);
        assert!(config.events.enabled());
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let config: HeraldConfig = toml::from_str("").unwrap();
        assert_eq!(config, HeraldConfig::default());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = HeraldConfig {
            queue: QueueConfig {
                name: Some("urgent".to_string()),
                delay: Some(10),
                tries: Some(2),
            },
            events: EventsConfig {
                enabled: Some(false),
                log_events: None,
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: HeraldConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config, parsed);
    }
}
