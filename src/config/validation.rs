//! Configuration validation logic
//!
//! Each section checks its own values; `Settings::validate` reports the
//! first failure.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    FileSettings, LoggerSettings, MessagingConfig, ProviderConfig, ServerConfig, Settings,
};
use crate::utils::validate::{is_valid_email_address, is_valid_phone_number};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request and keep-alive timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation("server.host", "Host cannot be empty."));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        Ok(())
    }
}

impl ProviderConfig {
    /// Validate provider connection settings
    ///
    /// # Validation Rules
    /// - Region and application id are required
    /// - Access key id and secret come as a pair
    /// - Endpoint overrides must be absolute http(s) URLs
    /// - Timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() || self.region.contains(char::is_whitespace) {
            return Err(ConfigError::validation(
                "provider.region",
                "Region is required, e.g. us-east-1.",
            ));
        }

        if self.application_id.trim().is_empty() {
            return Err(ConfigError::validation(
                "provider.application_id",
                "Pinpoint application id is required.",
            ));
        }

        let has_key_id = !self.access_key_id.trim().is_empty();
        let has_secret = !self.secret_access_key.trim().is_empty();
        if has_key_id != has_secret {
            return Err(ConfigError::validation(
                "provider.secret_access_key",
                "access_key_id and secret_access_key must be set together.",
            ));
        }

        for (field, endpoint) in [
            ("provider.pinpoint_endpoint", &self.pinpoint_endpoint),
            ("provider.sms_voice_endpoint", &self.sms_voice_endpoint),
        ] {
            if let Some(endpoint) = endpoint
                && !is_http_url(endpoint)
            {
                return Err(ConfigError::validation(
                    field,
                    format!("Invalid endpoint URL '{}'. Expected http(s)://host[:port]", endpoint),
                ));
            }
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "provider.request_timeout",
                "Provider request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "provider.connect_timeout",
                "Provider connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

impl MessagingConfig {
    /// Validate channel defaults
    ///
    /// Sender address and origination number may be left empty (the email or
    /// voice channel then fails at the provider), but when set they must be
    /// well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language_code.trim().is_empty() {
            return Err(ConfigError::validation(
                "messaging.language_code",
                "Default language code cannot be empty.",
            ));
        }

        if self.default_voice_id.trim().is_empty() {
            return Err(ConfigError::validation(
                "messaging.default_voice_id",
                "Default voice id cannot be empty.",
            ));
        }

        if self.charset.trim().is_empty() {
            return Err(ConfigError::validation(
                "messaging.charset",
                "Email charset cannot be empty.",
            ));
        }

        if !self.sender_address.is_empty() && !is_valid_email_address(&self.sender_address) {
            return Err(ConfigError::validation(
                "messaging.sender_address",
                format!("'{}' is not a valid email address.", self.sender_address),
            ));
        }

        if !self.origination_number.is_empty() && !is_valid_phone_number(&self.origination_number)
        {
            return Err(ConfigError::validation(
                "messaging.origination_number",
                format!(
                    "'{}' is not an E.164 phone number.",
                    self.origination_number
                ),
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console or logger.file must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.provider.validate()?;
        self.messaging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_provider() -> ProviderConfig {
        ProviderConfig {
            application_id: "0123456789abcdef0123456789abcdef".to_string(),
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            ..Default::default()
        }
    }

    fn field_of(err: ConfigError) -> String {
        err.field().unwrap_or_default().to_string()
    }

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_provider_config_valid() {
        assert!(valid_provider().validate().is_ok());
    }

    #[test]
    fn test_provider_without_credentials_is_valid() {
        let config = ProviderConfig {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            ..valid_provider()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_requires_application_id() {
        let config = ProviderConfig {
            application_id: "  ".to_string(),
            ..valid_provider()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "provider.application_id"
        );
    }

    #[test]
    fn test_provider_requires_region() {
        let config = ProviderConfig {
            region: String::new(),
            ..valid_provider()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "provider.region");
    }

    #[test]
    fn test_provider_half_credentials_rejected() {
        let config = ProviderConfig {
            secret_access_key: String::new(),
            ..valid_provider()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "provider.secret_access_key"
        );
    }

    #[test]
    fn test_provider_endpoint_must_be_http_url() {
        let config = ProviderConfig {
            pinpoint_endpoint: Some("localhost:4566".to_string()),
            ..valid_provider()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "provider.pinpoint_endpoint"
        );

        let config = ProviderConfig {
            sms_voice_endpoint: Some("http://127.0.0.1:4566".to_string()),
            ..valid_provider()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_messaging_defaults_valid() {
        assert!(MessagingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_messaging_rejects_bad_sender() {
        let config = MessagingConfig {
            sender_address: "no-reply".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "messaging.sender_address"
        );
    }

    #[test]
    fn test_messaging_rejects_bad_origination_number() {
        let config = MessagingConfig {
            origination_number: "5551234".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "messaging.origination_number"
        );
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let config = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut config = LoggerSettings::default();
        config.file.format = "xml".to_string();
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "logger.file.format"
        );
    }

    #[test]
    fn test_logger_settings_requires_an_output() {
        let mut config = LoggerSettings::default();
        config.console.enabled = false;
        config.file.enabled = false;
        assert_eq!(field_of(config.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_settings_validate_reports_first_failure() {
        let mut settings = Settings {
            provider: valid_provider(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        settings.provider.application_id.clear();
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");
    }
}
