//! Configuration settings structures for notify-gateway
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "notify-gateway".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/notify-gateway.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_provider_request_timeout() -> u64 {
    30
}

fn default_provider_connect_timeout() -> u64 {
    10
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_voice_id() -> String {
    "Matthew".to_string()
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Messaging provider (Amazon Pinpoint) connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// AWS region the Pinpoint application lives in, e.g. `us-east-1`
    #[serde(default = "default_region")]
    pub region: String,

    /// Pinpoint project (application) id
    #[serde(default)]
    pub application_id: String,

    /// AWS access key id
    #[serde(default)]
    pub access_key_id: String,

    /// AWS secret access key. Keep it out of committed files; use
    /// `NOTIFY_PROVIDER__SECRET_ACCESS_KEY` instead.
    #[serde(default)]
    pub secret_access_key: String,

    /// Optional STS session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<String>,

    /// Overrides `https://pinpoint.{region}.amazonaws.com`
    #[serde(default)]
    pub pinpoint_endpoint: Option<String>,

    /// Overrides `https://sms-voice.pinpoint.{region}.amazonaws.com`
    #[serde(default)]
    pub sms_voice_endpoint: Option<String>,

    /// Total provider request timeout in seconds
    #[serde(default = "default_provider_request_timeout")]
    pub request_timeout: u64,

    /// Provider connect timeout in seconds
    #[serde(default = "default_provider_connect_timeout")]
    pub connect_timeout: u64,
}

impl ProviderConfig {
    /// Whether a key pair has been configured
    pub fn has_credentials(&self) -> bool {
        !self.access_key_id.trim().is_empty() && !self.secret_access_key.trim().is_empty()
    }

    /// Base URL for the Pinpoint messages API
    pub fn pinpoint_base_url(&self) -> String {
        self.pinpoint_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://pinpoint.{}.amazonaws.com", self.region))
    }

    /// Base URL for the Pinpoint SMS and Voice API
    pub fn sms_voice_base_url(&self) -> String {
        self.sms_voice_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://sms-voice.pinpoint.{}.amazonaws.com", self.region))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            application_id: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
            pinpoint_endpoint: None,
            sms_voice_endpoint: None,
            request_timeout: default_provider_request_timeout(),
            connect_timeout: default_provider_connect_timeout(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("region", &self.region)
            .field("application_id", &self.application_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("pinpoint_endpoint", &self.pinpoint_endpoint)
            .field("sms_voice_endpoint", &self.sms_voice_endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

// ============================================================================
// Messaging Defaults
// ============================================================================

/// Per-channel defaults applied when building provider requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Voice language used when a request does not carry one
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Voice id used when a request does not carry one
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,

    /// Verified sender address for email
    #[serde(default)]
    pub sender_address: String,

    /// Character set for every email part
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Origination phone number for voice messages
    #[serde(default)]
    pub origination_number: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            default_voice_id: default_voice_id(),
            sender_address: String::new(),
            charset: default_charset(),
            origination_number: String::new(),
        }
    }
}

// ============================================================================
// Logger Settings (file representation of LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        Ok(LoggerConfig {
            console: ConsoleConfig {
                enabled: self.console.enabled,
                colored: self.console.colored,
            },
            file: self.file.into_file_config()?,
            level: self.level,
        })
    }
}

impl FileSettings {
    fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        })
    }
}

// ============================================================================
// Main Settings
// ============================================================================

/// Complete application settings, read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,
}
