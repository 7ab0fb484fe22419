//! # herald-config
//!
//! TOML configuration types, loading, and validation for the Herald
//! notification dispatcher.
//!
//! Single source of truth for queue hand-off defaults and lifecycle event
//! settings. Configuration is merged from built-in defaults, the user
//! config file, the project config file, and `HERALD_*` environment
//! variables, in that order.

mod loading;
mod validation;

pub mod errors;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{load_config_file, merge_configs};
pub use types::{
    DEFAULT_QUEUE_NAME, DEFAULT_QUEUE_TRIES, EventsConfig, HeraldConfig, QueueConfig,
};
pub use validation::validate_config;

impl HeraldConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
