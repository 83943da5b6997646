//! Message dispatch DTOs.
//!
//! Every inbound field is optional on the wire so that a missing value
//! reaches validation and fails with the uniform envelope instead of a
//! framework rejection.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::messaging::{
    Channel, DispatchError, EmailMessage, TextMessage, VoiceMessage,
};

/// Request body for `POST /SendTextMessage`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "destinationNumber": "+14155552671",
    "messageBody": "Your verification code is 123456",
    "messageType": "TRANSACTIONAL"
}))]
pub struct SendTextMessageRequest {
    /// E.164 destination number
    pub destination_number: Option<String>,
    pub message_body: Option<String>,
    /// TRANSACTIONAL or PROMOTIONAL, case-insensitive
    pub message_type: Option<String>,
}

impl SendTextMessageRequest {
    pub fn into_message(self) -> Result<TextMessage, DispatchError> {
        TextMessage::new(self.destination_number, self.message_body, self.message_type)
    }
}

/// Request body for `POST /SendVoiceMessage`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "destinationNumber": "+14155552671",
    "plainTextMessage": "Your appointment is tomorrow at nine",
    "languageCode": "en-US",
    "voiceId": "Joanna"
}))]
pub struct SendVoiceMessageRequest {
    /// E.164 destination number
    pub destination_number: Option<String>,
    /// Takes precedence over `plainTextMessage` when both are set
    pub ssml_message: Option<String>,
    pub plain_text_message: Option<String>,
    /// Defaults to `messaging.language_code`
    pub language_code: Option<String>,
    /// Defaults to `messaging.default_voice_id`
    pub voice_id: Option<String>,
}

impl SendVoiceMessageRequest {
    pub fn into_message(self) -> Result<VoiceMessage, DispatchError> {
        VoiceMessage::new(
            self.destination_number,
            self.ssml_message,
            self.plain_text_message,
            self.language_code,
            self.voice_id,
        )
    }
}

/// Request body for `POST /SendEmail`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "toAddress": "user@example.com",
    "subjectBody": "Welcome",
    "htmlBody": "<h1>Welcome aboard</h1>"
}))]
pub struct SendEmailRequest {
    pub to_address: Option<String>,
    pub subject_body: Option<String>,
    /// Takes precedence over `textBody` when both are set
    pub html_body: Option<String>,
    pub text_body: Option<String>,
}

impl SendEmailRequest {
    pub fn into_message(self) -> Result<EmailMessage, DispatchError> {
        EmailMessage::new(
            self.to_address,
            self.subject_body,
            self.html_body,
            self.text_body,
        )
    }
}

/// Uniform dispatch response: 200 on success, 400 on any failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "success": true, "message": "SMS sent." }))]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
}

impl DispatchResult {
    pub fn success(channel: Channel) -> Self {
        Self {
            success: true,
            message: channel.success_message(),
        }
    }

    pub fn failure(channel: Channel) -> Self {
        Self {
            success: false,
            message: channel.failure_message(),
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for DispatchResult {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
