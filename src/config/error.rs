//! Configuration error types

use thiserror::Error;

/// Errors raised while loading, merging or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// The merged sources could not be deserialized into `Settings`
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A setting holds an unacceptable value
    #[error("Invalid setting {field}: {message}")]
    Validation { field: String, message: String },

    /// `NOTIFY_APP_ENV` (or `--env`) names no known environment
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// Two sources that cannot be combined were both given
    #[error("Conflicting configuration sources: {0}")]
    Conflict(String),

    /// Error bubbled up from the `config` crate
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }

    /// Name of the offending setting, when the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
