//! Serve command handler

use crate::config::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler<'a> {
    config: &'a Settings,
}

impl<'a> ServeCommandHandler<'a> {
    pub fn new(config: &'a Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print what the server would run with.
    pub fn dry_run(&self) -> AppResult<()> {
        self.config.validate()?;

        for line in self.summary() {
            println!("✓ {line}");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");

        Ok(())
    }

    /// Human-readable configuration summary; secrets are reported only as
    /// present or missing.
    pub fn summary(&self) -> Vec<String> {
        let server = &self.config.server;
        let provider = &self.config.provider;
        let messaging = &self.config.messaging;

        let present = |set: bool| if set { "configured" } else { "missing" };

        vec![
            format!("Server would bind to: {}", server.address()),
            format!(
                "Provider region: {} (application {})",
                provider.region, provider.application_id
            ),
            format!("Provider credentials: {}", present(provider.has_credentials())),
            format!("Messages endpoint: {}", provider.pinpoint_base_url()),
            format!("Voice endpoint: {}", provider.sms_voice_base_url()),
            format!(
                "Email sender: {}",
                present(!messaging.sender_address.is_empty())
            ),
            format!(
                "Voice origination number: {}",
                present(!messaging.origination_number.is_empty())
            ),
            format!("Log level: {}", self.config.logger.level),
        ]
    }
}
