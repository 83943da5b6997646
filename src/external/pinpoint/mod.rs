mod client;
mod error;
mod provider;
pub mod types;

pub use client::{MESSAGES_SERVICE, PinpointClient, PinpointSession, SMS_VOICE_SERVICE};
pub use error::{ProviderError, ProviderResult};
pub use provider::{MessagingProvider, ProviderSession};
