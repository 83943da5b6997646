//! In-memory provider used by service and handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::external::pinpoint::types::{
    MessageResponse, MessageResult, SendMessagesRequest, SendVoiceMessageRequest,
    SendVoiceMessageResponse,
};
use crate::external::pinpoint::{MessagingProvider, ProviderError, ProviderResult, ProviderSession};

#[derive(Debug, Clone, Copy)]
pub(crate) enum MockBehaviour {
    /// 200 for the call and for every recipient
    Deliver,
    /// 200 for the call, the given code for every recipient
    RecipientStatus(i32),
    /// 200 for the call, empty result map
    MissingRecipient,
    /// Outer HTTP failure
    HttpStatus(u16),
    /// No session can be acquired
    ConnectFailure,
    /// Delivers, but only after the given delay
    Slow(Duration),
}

#[derive(Default)]
struct Recorded {
    connects: AtomicUsize,
    releases: AtomicUsize,
    messages: Mutex<Vec<SendMessagesRequest>>,
    voice: Mutex<Vec<SendVoiceMessageRequest>>,
}

#[derive(Clone)]
pub(crate) struct MockProvider {
    behaviour: MockBehaviour,
    recorded: Arc<Recorded>,
}

impl MockProvider {
    pub(crate) fn new(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            recorded: Arc::default(),
        }
    }

    pub(crate) fn connects(&self) -> usize {
        self.recorded.connects.load(Ordering::SeqCst)
    }

    pub(crate) fn releases(&self) -> usize {
        self.recorded.releases.load(Ordering::SeqCst)
    }

    pub(crate) fn sent_messages(&self) -> Vec<SendMessagesRequest> {
        self.recorded.messages.lock().unwrap().clone()
    }

    pub(crate) fn sent_voice(&self) -> Vec<SendVoiceMessageRequest> {
        self.recorded.voice.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn connect(&self) -> ProviderResult<Box<dyn ProviderSession>> {
        if let MockBehaviour::ConnectFailure = self.behaviour {
            return Err(ProviderError::Configuration("mock refuses sessions".into()));
        }
        self.recorded.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            behaviour: self.behaviour,
            recorded: Arc::clone(&self.recorded),
        }))
    }
}

struct MockSession {
    behaviour: MockBehaviour,
    recorded: Arc<Recorded>,
}

impl MockSession {
    async fn outer_status(&self) -> ProviderResult<()> {
        match self.behaviour {
            MockBehaviour::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            MockBehaviour::HttpStatus(status) => Err(ProviderError::Status {
                status,
                body: "{\"message\":\"mock failure\"}".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProviderSession for MockSession {
    async fn send_messages(
        &self,
        request: &SendMessagesRequest,
    ) -> ProviderResult<MessageResponse> {
        self.recorded.messages.lock().unwrap().push(request.clone());
        self.outer_status().await?;

        let status_code = match self.behaviour {
            MockBehaviour::RecipientStatus(code) => code,
            _ => 200,
        };
        let result: HashMap<String, MessageResult> = match self.behaviour {
            MockBehaviour::MissingRecipient => HashMap::new(),
            _ => request
                .message_request
                .addresses
                .keys()
                .map(|address| {
                    (
                        address.clone(),
                        MessageResult {
                            delivery_status: None,
                            status_code,
                            status_message: None,
                            message_id: Some("mock-message".to_string()),
                        },
                    )
                })
                .collect(),
        };

        Ok(MessageResponse {
            application_id: Some(request.application_id.clone()),
            request_id: Some("mock-request".to_string()),
            result,
        })
    }

    async fn send_voice_message(
        &self,
        request: &SendVoiceMessageRequest,
    ) -> ProviderResult<SendVoiceMessageResponse> {
        self.recorded.voice.lock().unwrap().push(request.clone());
        self.outer_status().await?;

        Ok(SendVoiceMessageResponse {
            message_id: Some("mock-voice".to_string()),
        })
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.recorded.releases.fetch_add(1, Ordering::SeqCst);
    }
}
