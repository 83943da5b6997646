use thiserror::Error;

/// Failures talking to the messaging provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("delivery to {address} was rejected with status {status_code}")]
    RecipientStatus { address: String, status_code: i32 },

    #[error("provider response has no result for {address}")]
    MissingRecipient { address: String },

    #[error("invalid provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("provider is not configured: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// HTTP status reported by the provider, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
