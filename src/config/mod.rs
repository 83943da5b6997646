//! Configuration management module for notify-gateway
//!
//! Layered TOML files plus `NOTIFY_*` environment variable overrides.
//! See [`ConfigLoader`] for the precedence order.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, LoggerSettings, MessagingConfig, ProviderConfig, ServerConfig, Settings,
};
