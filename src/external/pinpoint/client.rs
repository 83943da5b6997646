//! reqwest-based Pinpoint client, signed with `aws-sigv4`.

use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SigningInstructions, SigningParams, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ProviderError, ProviderResult};
use super::provider::{MessagingProvider, ProviderSession};
use super::types::{
    MessageResponse, SendMessagesRequest, SendVoiceMessageRequest, SendVoiceMessageResponse,
};
use crate::config::ProviderConfig;
use crate::external::client::build_http_client;

/// Signing name of the Pinpoint messages API
pub const MESSAGES_SERVICE: &str = "mobiletargeting";

/// Signing name of the Pinpoint SMS and Voice API
pub const SMS_VOICE_SERVICE: &str = "sms-voice";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug)]
struct Endpoints {
    pinpoint: Url,
    sms_voice: Url,
}

/// SigV4 identity and region shared by both Pinpoint APIs
#[derive(Debug)]
struct Signer {
    identity: Identity,
    region: String,
}

impl Signer {
    fn new(config: &ProviderConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.session_token.clone().filter(|t| !t.trim().is_empty()),
            None,
            "notify-gateway",
        );
        Self {
            identity: credentials.into(),
            region: config.region.clone(),
        }
    }

    /// Headers that authenticate a JSON `POST` of `payload` to `url`
    fn sign(&self, service: &str, url: &Url, payload: &[u8]) -> ProviderResult<SigningInstructions> {
        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&self.identity)
            .region(&self.region)
            .name(service)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| ProviderError::Signing(e.to_string()))?
            .into();

        let request = SignableRequest::new(
            "POST",
            url.as_str(),
            std::iter::once((CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)),
            SignableBody::Bytes(payload),
        )
        .map_err(|e| ProviderError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(request, &params)
            .map_err(|e| ProviderError::Signing(e.to_string()))?
            .into_parts();
        Ok(instructions)
    }
}

/// Amazon Pinpoint provider
#[derive(Debug, Clone)]
pub struct PinpointClient {
    http: reqwest::Client,
    endpoints: Arc<Endpoints>,
    signer: Option<Arc<Signer>>,
}

impl PinpointClient {
    /// Build a client from provider settings.
    ///
    /// Missing credentials are not an error here; [`MessagingProvider::connect`]
    /// reports them so the server can still start and answer health probes.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let endpoints = Endpoints {
            pinpoint: parse_base_url(&config.pinpoint_base_url())?,
            sms_voice: parse_base_url(&config.sms_voice_base_url())?,
        };

        let signer = config
            .has_credentials()
            .then(|| Arc::new(Signer::new(config)));

        Ok(Self {
            http: build_http_client(config)?,
            endpoints: Arc::new(endpoints),
            signer,
        })
    }
}

fn parse_base_url(raw: &str) -> ProviderResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ProviderError::Configuration(format!("invalid endpoint '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ProviderError::Configuration(format!(
            "endpoint '{}' cannot carry a path",
            raw
        )));
    }
    Ok(url)
}

fn endpoint_url(base: &Url, segments: &[&str]) -> ProviderResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProviderError::Configuration(format!("endpoint '{}' cannot carry a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl MessagingProvider for PinpointClient {
    fn name(&self) -> &'static str {
        "pinpoint"
    }

    async fn connect(&self) -> ProviderResult<Box<dyn ProviderSession>> {
        let signer = self.signer.clone().ok_or_else(|| {
            ProviderError::Configuration("access key id and secret access key are not set".into())
        })?;

        tracing::debug!(provider = self.name(), "provider session acquired");
        Ok(Box::new(PinpointSession {
            http: self.http.clone(),
            endpoints: Arc::clone(&self.endpoints),
            signer,
        }))
    }
}

/// Per-dispatch session; logs its release when dropped
pub struct PinpointSession {
    http: reqwest::Client,
    endpoints: Arc<Endpoints>,
    signer: Arc<Signer>,
}

impl PinpointSession {
    async fn post_json<B, R>(&self, service: &str, url: Url, body: &B) -> ProviderResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let signed = self.signer.sign(service, &url, &payload)?;

        tracing::debug!(service, path = url.path(), "calling provider");

        let mut request = self.http.post(url).header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in signed.headers() {
            request = request.header(name, value);
        }

        let response = request.body(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ProviderSession for PinpointSession {
    async fn send_messages(
        &self,
        request: &SendMessagesRequest,
    ) -> ProviderResult<MessageResponse> {
        let url = endpoint_url(
            &self.endpoints.pinpoint,
            &["v1", "apps", request.application_id.as_str(), "messages"],
        )?;
        self.post_json(MESSAGES_SERVICE, url, &request.message_request)
            .await
    }

    async fn send_voice_message(
        &self,
        request: &SendVoiceMessageRequest,
    ) -> ProviderResult<SendVoiceMessageResponse> {
        let url = endpoint_url(
            &self.endpoints.sms_voice,
            &["v1", "sms-voice", "voice", "message"],
        )?;
        self.post_json(SMS_VOICE_SERVICE, url, request).await
    }
}

impl Drop for PinpointSession {
    fn drop(&mut self) {
        tracing::debug!(provider = "pinpoint", "provider session released");
    }
}
