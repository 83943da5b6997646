//! Outbound messaging: validation models, provider request builders and
//! the dispatch service.

pub mod builders;
mod channel;
mod error;
pub mod models;
mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::Channel;
pub use error::DispatchError;
pub use models::{EmailBody, EmailMessage, TextMessage, VoiceContent, VoiceMessage};
pub use service::MessagingService;
