use async_trait::async_trait;

use super::error::ProviderResult;
use super::types::{
    MessageResponse, SendMessagesRequest, SendVoiceMessageRequest, SendVoiceMessageResponse,
};

/// Source of provider sessions.
///
/// A session is acquired per dispatch and released when dropped, so every
/// exit path of a handler gives it back.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn connect(&self) -> ProviderResult<Box<dyn ProviderSession>>;
}

/// One acquired connection to the provider.
///
/// Implementations return `Err` for transport failures and for any outer
/// HTTP status other than 200; per-recipient results are left to the caller.
#[async_trait]
pub trait ProviderSession: Send + Sync {
    async fn send_messages(&self, request: &SendMessagesRequest)
    -> ProviderResult<MessageResponse>;

    async fn send_voice_message(
        &self,
        request: &SendVoiceMessageRequest,
    ) -> ProviderResult<SendVoiceMessageResponse>;
}
