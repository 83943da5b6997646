//! Pinpoint REST payloads.
//!
//! Field names follow the service's PascalCase JSON; only the members this
//! gateway sends or reads are modelled.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::validate::MessageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelType {
    Sms,
    Email,
}

/// `POST /v1/apps/{ApplicationId}/messages`
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessagesRequest {
    pub application_id: String,
    pub message_request: MessageRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageRequest {
    pub addresses: HashMap<String, AddressConfiguration>,
    pub message_configuration: DirectMessageConfiguration,
}

impl MessageRequest {
    /// Request addressed to a single destination
    pub fn single(
        address: impl Into<String>,
        channel_type: ChannelType,
        message_configuration: DirectMessageConfiguration,
    ) -> Self {
        Self {
            addresses: HashMap::from([(address.into(), AddressConfiguration { channel_type })]),
            message_configuration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressConfiguration {
    pub channel_type: ChannelType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessageConfiguration {
    #[serde(rename = "SMSMessage", default, skip_serializing_if = "Option::is_none")]
    pub sms_message: Option<SmsMessage>,

    #[serde(rename = "EmailMessage", default, skip_serializing_if = "Option::is_none")]
    pub email_message: Option<EmailMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmsMessage {
    pub body: String,
    pub message_type: MessageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailMessage {
    pub from_address: String,
    pub simple_email: SimpleEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimpleEmail {
    pub subject: SimpleEmailPart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_part: Option<SimpleEmailPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_part: Option<SimpleEmailPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimpleEmailPart {
    pub charset: String,
    pub data: String,
}

/// Send-messages response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageResponse {
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub result: HashMap<String, MessageResult>,
}

/// Per-address outcome inside a [`MessageResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageResult {
    #[serde(default)]
    pub delivery_status: Option<String>,
    pub status_code: i32,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// `POST /v1/sms-voice/voice/message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendVoiceMessageRequest {
    pub destination_phone_number: String,
    pub origination_phone_number: String,
    pub content: VoiceMessageContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMessageContent {
    #[serde(rename = "SSMLMessage", default, skip_serializing_if = "Option::is_none")]
    pub ssml_message: Option<VoiceText>,

    #[serde(rename = "PlainTextMessage", default, skip_serializing_if = "Option::is_none")]
    pub plain_text_message: Option<VoiceText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceText {
    pub language_code: String,
    pub voice_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendVoiceMessageResponse {
    #[serde(default)]
    pub message_id: Option<String>,
}
