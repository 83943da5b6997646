//! Validated outbound messages.
//!
//! Constructors take the raw optional fields of an inbound request and
//! either produce a message that is safe to hand to a request builder or a
//! [`DispatchError::Rejected`]. Blank means absent, empty or whitespace-only.

use crate::services::messaging::DispatchError;
use crate::utils::validate::{
    MessageType, is_blank, is_valid_email_address, is_valid_phone_number,
};

/// Returns the value when it is not blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(Some(v)))
}

fn required(value: Option<String>, field: &str) -> Result<String, DispatchError> {
    present(value).ok_or_else(|| DispatchError::rejected(format!("{} is required", field)))
}

fn phone_number(value: Option<String>, field: &str) -> Result<String, DispatchError> {
    let number = required(value, field)?;
    if !is_valid_phone_number(&number) {
        return Err(DispatchError::rejected(format!(
            "{} '{}' is not an E.164 phone number",
            field, number
        )));
    }
    Ok(number)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub destination_number: String,
    pub message_body: String,
    pub message_type: MessageType,
}

impl TextMessage {
    pub fn new(
        destination_number: Option<String>,
        message_body: Option<String>,
        message_type: Option<String>,
    ) -> Result<Self, DispatchError> {
        let message_body = required(message_body, "messageBody")?;
        let message_type = required(message_type, "messageType")?
            .parse::<MessageType>()
            .map_err(DispatchError::rejected)?;
        let destination_number = phone_number(destination_number, "destinationNumber")?;

        Ok(Self {
            destination_number,
            message_body,
            message_type,
        })
    }
}

/// What a voice call reads out; SSML takes precedence over plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceContent {
    Ssml(String),
    PlainText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMessage {
    pub destination_number: String,
    pub content: VoiceContent,
    pub language_code: Option<String>,
    pub voice_id: Option<String>,
}

impl VoiceMessage {
    pub fn new(
        destination_number: Option<String>,
        ssml_message: Option<String>,
        plain_text_message: Option<String>,
        language_code: Option<String>,
        voice_id: Option<String>,
    ) -> Result<Self, DispatchError> {
        let content = match (present(ssml_message), present(plain_text_message)) {
            (Some(ssml), _) => VoiceContent::Ssml(ssml),
            (None, Some(text)) => VoiceContent::PlainText(text),
            (None, None) => {
                return Err(DispatchError::rejected(
                    "one of ssmlMessage or plainTextMessage is required",
                ));
            }
        };
        let destination_number = phone_number(destination_number, "destinationNumber")?;

        Ok(Self {
            destination_number,
            content,
            language_code: present(language_code),
            voice_id: present(voice_id),
        })
    }
}

/// Email body; HTML takes precedence over plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Html(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_address: String,
    pub subject: String,
    pub body: EmailBody,
}

impl EmailMessage {
    pub fn new(
        to_address: Option<String>,
        subject: Option<String>,
        html_body: Option<String>,
        text_body: Option<String>,
    ) -> Result<Self, DispatchError> {
        let subject = required(subject, "subjectBody")?;
        let to_address = required(to_address, "toAddress")?;
        let body = match (present(html_body), present(text_body)) {
            (Some(html), _) => EmailBody::Html(html),
            (None, Some(text)) => EmailBody::Text(text),
            (None, None) => {
                return Err(DispatchError::rejected(
                    "one of htmlBody or textBody is required",
                ));
            }
        };

        if !is_valid_email_address(&to_address) {
            return Err(DispatchError::rejected(format!(
                "toAddress '{}' is not a valid email address",
                to_address
            )));
        }

        Ok(Self {
            to_address,
            subject,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_text_message_valid() {
        let message =
            TextMessage::new(s("+14155552671"), s("hello"), s("transactional")).unwrap();
        assert_eq!(message.message_type, MessageType::Transactional);
        assert_eq!(message.message_body, "hello");
    }

    #[test]
    fn test_text_message_rejects_blank_fields() {
        assert!(TextMessage::new(s("+14155552671"), None, s("PROMOTIONAL")).is_err());
        assert!(TextMessage::new(s("+14155552671"), s("   "), s("PROMOTIONAL")).is_err());
        assert!(TextMessage::new(None, s("hi"), s("PROMOTIONAL")).is_err());
        assert!(TextMessage::new(s("+14155552671"), s("hi"), s("\t")).is_err());
    }

    #[test]
    fn test_text_message_rejects_bad_number_and_type() {
        let err = TextMessage::new(s("4155552671"), s("hi"), s("PROMOTIONAL")).unwrap_err();
        assert!(err.is_rejection());
        assert!(TextMessage::new(s("+14155552671"), s("hi"), s("spam")).is_err());
    }

    #[test]
    fn test_voice_message_prefers_ssml() {
        let message = VoiceMessage::new(
            s("+14155552671"),
            s("<speak>hi</speak>"),
            s("hi"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(message.content, VoiceContent::Ssml("<speak>hi</speak>".into()));
    }

    #[test]
    fn test_voice_message_falls_back_to_plain_text() {
        let message =
            VoiceMessage::new(s("+14155552671"), s("  "), s("hi"), s(""), s("Joanna")).unwrap();
        assert_eq!(message.content, VoiceContent::PlainText("hi".into()));
        assert!(message.language_code.is_none());
        assert_eq!(message.voice_id.as_deref(), Some("Joanna"));
    }

    #[test]
    fn test_voice_message_requires_content() {
        assert!(VoiceMessage::new(s("+14155552671"), None, s(" "), None, None).is_err());
    }

    #[test]
    fn test_email_message_prefers_html() {
        let message =
            EmailMessage::new(s("a@b.com"), s("Hi"), s("<p>hi</p>"), s("hi")).unwrap();
        assert_eq!(message.body, EmailBody::Html("<p>hi</p>".into()));

        let message = EmailMessage::new(s("a@b.com"), s("Hi"), None, s("hi")).unwrap();
        assert_eq!(message.body, EmailBody::Text("hi".into()));
    }

    #[test]
    fn test_email_message_rejections() {
        assert!(EmailMessage::new(s("not-an-email"), s("Hi"), None, s("hi")).is_err());
        assert!(EmailMessage::new(s("a@b.com"), s(" "), None, s("hi")).is_err());
        assert!(EmailMessage::new(s("a@b.com"), s("Hi"), None, None).is_err());
    }
}
