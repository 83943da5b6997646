//! Dispatch orchestration: build, call the provider once, check the result.

use std::sync::Arc;

use crate::config::MessagingConfig;
use crate::external::pinpoint::types::MessageResponse;
use crate::external::pinpoint::{MessagingProvider, ProviderError};
use crate::services::messaging::DispatchError;
use crate::services::messaging::builders::{
    build_email_request, build_sms_request, build_voice_request,
};
use crate::services::messaging::models::{EmailMessage, TextMessage, VoiceMessage};

const RECIPIENT_OK: i32 = 200;

/// Sends validated messages through the configured provider.
///
/// Each call acquires its own provider session and releases it before
/// returning, on success and failure alike. There are no retries.
#[derive(Clone)]
pub struct MessagingService {
    provider: Arc<dyn MessagingProvider>,
    application_id: Arc<str>,
    messaging: Arc<MessagingConfig>,
}

impl MessagingService {
    pub fn new(
        provider: Arc<dyn MessagingProvider>,
        application_id: impl Into<Arc<str>>,
        messaging: MessagingConfig,
    ) -> Self {
        Self {
            provider,
            application_id: application_id.into(),
            messaging: Arc::new(messaging),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn send_text(&self, message: &TextMessage) -> Result<(), DispatchError> {
        let request = build_sms_request(message, &self.application_id);

        let session = self.provider.connect().await?;
        let response = session.send_messages(&request).await?;
        check_recipient(&response, &message.destination_number)?;

        tracing::debug!(request_id = ?response.request_id, "sms accepted by provider");
        Ok(())
    }

    /// Only the outer HTTP status is checked for voice; the voice API has no
    /// per-recipient result.
    pub async fn send_voice(&self, message: &VoiceMessage) -> Result<(), DispatchError> {
        let request = build_voice_request(message, &self.messaging);

        let session = self.provider.connect().await?;
        let response = session.send_voice_message(&request).await?;

        tracing::debug!(message_id = ?response.message_id, "voice message accepted by provider");
        Ok(())
    }

    pub async fn send_email(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        let request = build_email_request(message, &self.application_id, &self.messaging);

        let session = self.provider.connect().await?;
        let response = session.send_messages(&request).await?;
        check_recipient(&response, &message.to_address)?;

        tracing::debug!(request_id = ?response.request_id, "email accepted by provider");
        Ok(())
    }
}

fn check_recipient(response: &MessageResponse, address: &str) -> Result<(), ProviderError> {
    match response.result.get(address) {
        None => Err(ProviderError::MissingRecipient {
            address: address.to_string(),
        }),
        Some(result) if result.status_code != RECIPIENT_OK => Err(ProviderError::RecipientStatus {
            address: address.to_string(),
            status_code: result.status_code,
        }),
        Some(_) => Ok(()),
    }
}
