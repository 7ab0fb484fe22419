//! Configuration loading and merging logic.
//!
//! # Configuration hierarchy
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.herald/config.toml` (global user preferences)
//! 3. **Project config** - `./.herald/config.toml` (project-specific overrides)
//! 4. **Environment variables** - `HERALD_*` (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{EventsConfig, HeraldConfig, QueueConfig};
use crate::validation::validate_config;

const CONFIG_DIR: &str = ".herald";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; parse failures and validation
/// failures are.
pub fn load_hierarchy() -> Result<HeraldConfig, ConfigError> {
    let mut config = HeraldConfig::default();

    if let Some(path) = user_config_path() {
        match load_config_file(&path) {
            Ok(user_config) => config = merge_configs(config, user_config),
            Err(ConfigError::IoError { source })
                if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }

    let project_path = project_config_path()?;
    match load_config_file(&project_path) {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(ConfigError::IoError { source }) if source.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    apply_env_overrides(&mut config)?;
    validate_config(&config)?;

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn project_config_path() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<HeraldConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: HeraldConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;
    debug!(event = "config.file_loaded", path = %path.display());
    Ok(config)
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Optional fields from the override replace base values only if present.
pub fn merge_configs(base: HeraldConfig, override_config: HeraldConfig) -> HeraldConfig {
    HeraldConfig {
        queue: QueueConfig {
            name: override_config.queue.name.or(base.queue.name),
            delay: override_config.queue.delay.or(base.queue.delay),
            tries: override_config.queue.tries.or(base.queue.tries),
        },
        events: EventsConfig {
            enabled: override_config.events.enabled.or(base.events.enabled),
            log_events: override_config.events.log_events.or(base.events.log_events),
        },
    }
}

/// Apply `HERALD_*` environment variable overrides.
fn apply_env_overrides(config: &mut HeraldConfig) -> Result<(), ConfigError> {
    if let Some(name) = env_var("HERALD_QUEUE") {
        config.queue.name = Some(name);
    }
    if let Some(delay) = env_var("HERALD_QUEUE_DELAY") {
        config.queue.delay = Some(parse_env("HERALD_QUEUE_DELAY", &delay)?);
    }
    if let Some(tries) = env_var("HERALD_QUEUE_TRIES") {
        config.queue.tries = Some(parse_env("HERALD_QUEUE_TRIES", &tries)?);
    }
    if let Some(enabled) = env_var("HERALD_EVENTS_ENABLED") {
        config.events.enabled = Some(parse_env("HERALD_EVENTS_ENABLED", &enabled)?);
    }
    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidConfiguration {
            message: format!("{} has invalid value '{}'", name, value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_file_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[queue]\nname = \"urgent\"\ntries = 5");
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.queue.name(), "urgent");
        assert_eq!(config.queue.tries(), 5);
    }

    #[test]
    fn test_load_config_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_file(&dir.path().join("config.toml"));
        assert!(matches!(
            result,
            Err(ConfigError::IoError { ref source }) if source.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_load_config_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "queue = not valid toml [[");
        let result = load_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_merge_override_wins() {
        let base = HeraldConfig {
            queue: QueueConfig {
                name: Some("base".to_string()),
                delay: Some(1),
                tries: None,
            },
            events: EventsConfig::default(),
        };
        let override_config = HeraldConfig {
            queue: QueueConfig {
                name: Some("override".to_string()),
                delay: None,
                tries: Some(7),
            },
            events: EventsConfig {
                enabled: Some(false),
                log_events: None,
            },
        };
        let merged = merge_configs(base, override_config);
        assert_eq!(merged.queue.name(), "override");
        assert_eq!(merged.queue.delay(), 1);
        assert_eq!(merged.queue.tries(), 7);
        assert!(!merged.events.enabled());
    }

    #[test]
    fn test_merge_base_preserved_when_override_empty() {
        let base = HeraldConfig {
            queue: QueueConfig {
                name: Some("base".to_string()),
                delay: Some(2),
                tries: Some(4),
            },
            events: EventsConfig::default(),
        };
        let merged = merge_configs(base.clone(), HeraldConfig::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_env_override_queue_name() {
        temp_env::with_vars([("HERALD_QUEUE", Some("from-env"))], || {
            let mut config = HeraldConfig::default();
            apply_env_overrides(&mut config).unwrap();
            assert_eq!(config.queue.name(), "from-env");
        });
    }

    #[test]
    fn test_env_override_numeric_fields() {
        temp_env::with_vars(
            [
                ("HERALD_QUEUE_DELAY", Some("15")),
                ("HERALD_QUEUE_TRIES", Some("9")),
            ],
            || {
                let mut config = HeraldConfig::default();
                apply_env_overrides(&mut config).unwrap();
                assert_eq!(config.queue.delay(), 15);
                assert_eq!(config.queue.tries(), 9);
            },
        );
    }

    #[test]
    fn test_env_override_invalid_number_fails() {
        temp_env::with_vars([("HERALD_QUEUE_DELAY", Some("soon"))], || {
            let mut config = HeraldConfig::default();
            let result = apply_env_overrides(&mut config);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidConfiguration { .. })
            ));
        });
    }

    #[test]
    fn test_env_override_empty_value_ignored() {
        temp_env::with_vars([("HERALD_QUEUE", Some(""))], || {
            let mut config = HeraldConfig::default();
            apply_env_overrides(&mut config).unwrap();
            assert_eq!(config.queue.name(), "notifications");
        });
    }

    #[test]
    fn test_env_override_events_enabled() {
        temp_env::with_vars([("HERALD_EVENTS_ENABLED", Some("false"))], || {
            let mut config = HeraldConfig::default();
            apply_env_overrides(&mut config).unwrap();
            assert!(!config.events.enabled());
        });
    }
}
