//! Provider request builders.
//!
//! Pure functions from a validated message plus static settings to the
//! payload the provider expects.

use crate::config::MessagingConfig;
use crate::external::pinpoint::types::{
    ChannelType, DirectMessageConfiguration, EmailMessage as EmailPayload, MessageRequest,
    SendMessagesRequest, SendVoiceMessageRequest, SimpleEmail, SimpleEmailPart, SmsMessage,
    VoiceMessageContent, VoiceText,
};
use crate::services::messaging::models::{
    EmailBody, EmailMessage, TextMessage, VoiceContent, VoiceMessage,
};

pub fn build_sms_request(message: &TextMessage, application_id: &str) -> SendMessagesRequest {
    SendMessagesRequest {
        application_id: application_id.to_string(),
        message_request: MessageRequest::single(
            message.destination_number.clone(),
            ChannelType::Sms,
            DirectMessageConfiguration {
                sms_message: Some(SmsMessage {
                    body: message.message_body.clone(),
                    message_type: message.message_type,
                }),
                email_message: None,
            },
        ),
    }
}

/// Every part, subject included, carries the configured charset.
pub fn build_email_request(
    message: &EmailMessage,
    application_id: &str,
    messaging: &MessagingConfig,
) -> SendMessagesRequest {
    let part = |data: &str| SimpleEmailPart {
        charset: messaging.charset.clone(),
        data: data.to_string(),
    };

    let (html_part, text_part) = match &message.body {
        EmailBody::Html(html) => (Some(part(html)), None),
        EmailBody::Text(text) => (None, Some(part(text))),
    };

    SendMessagesRequest {
        application_id: application_id.to_string(),
        message_request: MessageRequest::single(
            message.to_address.clone(),
            ChannelType::Email,
            DirectMessageConfiguration {
                sms_message: None,
                email_message: Some(EmailPayload {
                    from_address: messaging.sender_address.clone(),
                    simple_email: SimpleEmail {
                        subject: part(&message.subject),
                        html_part,
                        text_part,
                    },
                }),
            },
        ),
    }
}

pub fn build_voice_request(
    message: &VoiceMessage,
    messaging: &MessagingConfig,
) -> SendVoiceMessageRequest {
    let voice_text = |text: &str| VoiceText {
        language_code: message
            .language_code
            .clone()
            .unwrap_or_else(|| messaging.language_code.clone()),
        voice_id: message
            .voice_id
            .clone()
            .unwrap_or_else(|| messaging.default_voice_id.clone()),
        text: text.to_string(),
    };

    let content = match &message.content {
        VoiceContent::Ssml(ssml) => VoiceMessageContent {
            ssml_message: Some(voice_text(ssml)),
            plain_text_message: None,
        },
        VoiceContent::PlainText(text) => VoiceMessageContent {
            ssml_message: None,
            plain_text_message: Some(voice_text(text)),
        },
    };

    SendVoiceMessageRequest {
        destination_phone_number: message.destination_number.clone(),
        origination_phone_number: messaging.origination_number.clone(),
        content,
    }
}
