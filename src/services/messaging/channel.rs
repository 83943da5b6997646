use std::fmt;

/// Outbound channel served by a dispatch endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Sms,
    Voice,
    Email,
}

impl Channel {
    /// Label used in caller-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Voice => "Voice message",
            Channel::Email => "Email",
        }
    }

    pub fn success_message(&self) -> String {
        format!("{} sent.", self.label())
    }

    pub fn failure_message(&self) -> String {
        format!(
            "{} could not be sent, please contact helpdesk if issue persist.",
            self.label()
        )
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Sms => "sms",
            Channel::Voice => "voice",
            Channel::Email => "email",
        };
        f.write_str(name)
    }
}
