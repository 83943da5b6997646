//! Input validators for outbound message requests.
//!
//! All functions are pure: they never panic and the same input always
//! yields the same answer.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// E.164-like phone number: leading `+`, a non-zero first digit, up to 15
/// ASCII digits total. `[0-9]` rather than `\d`, which would also accept
/// other Unicode decimal digits.
static PHONE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+[1-9][0-9]{1,14}$").expect("phone number pattern is valid")
});

/// SMS routing class accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Transactional,
    Promotional,
}

impl MessageType {
    /// Wire representation (always uppercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Transactional => "TRANSACTIONAL",
            MessageType::Promotional => "PROMOTIONAL",
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRANSACTIONAL" => Ok(MessageType::Transactional),
            "PROMOTIONAL" => Ok(MessageType::Promotional),
            _ => Err(format!(
                "Invalid message type '{}'. Valid values are: TRANSACTIONAL, PROMOTIONAL",
                s
            )),
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true when `input` is an E.164 phone number (`+14155552671`).
pub fn is_valid_phone_number(input: &str) -> bool {
    PHONE_NUMBER_REGEX.is_match(input)
}

/// Returns true when `input` parses as a `local-part@domain` mail address.
pub fn is_valid_email_address(input: &str) -> bool {
    input.validate_email()
}

/// Case-insensitive check against `TRANSACTIONAL` / `PROMOTIONAL`.
pub fn is_valid_message_type(input: &str) -> bool {
    input.parse::<MessageType>().is_ok()
}

/// Treats `None`, empty and whitespace-only strings alike.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
