use thiserror::Error;

use crate::external::pinpoint::ProviderError;

/// Why a dispatch did not succeed.
///
/// Both variants collapse into the same caller-facing failure; the
/// distinction only matters for logs.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request rejected: {reason}")]
    Rejected { reason: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl DispatchError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        DispatchError::Rejected {
            reason: reason.into(),
        }
    }

    /// Whether the provider was never contacted
    pub fn is_rejection(&self) -> bool {
        matches!(self, DispatchError::Rejected { .. })
    }

    /// Outer HTTP status reported by the provider, when there was one
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            DispatchError::Provider(err) => err.status(),
            DispatchError::Rejected { .. } => None,
        }
    }
}
