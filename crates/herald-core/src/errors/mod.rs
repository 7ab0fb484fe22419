use std::error::Error;

/// Base trait for all application errors
pub trait HeraldError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type HeraldResult<T> = Result<T, Box<dyn HeraldError>>;

impl HeraldError for herald_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            herald_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            herald_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            herald_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            herald_config::ConfigError::ConfigParseError { .. }
                | herald_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}
