//! In-process fake of the Pinpoint REST API shared by integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use notify_gateway::config::ProviderConfig;

#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub authorization: Option<String>,
    pub amz_date: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Fake {
    captured: Arc<Mutex<Vec<Captured>>>,
    /// When set, every call answers with this status and an error body
    fail_with: Option<u16>,
    /// When set, every call is held this long before answering
    delay: Option<Duration>,
}

impl Fake {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    async fn hold(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        self.captured.lock().unwrap().push(Captured {
            path,
            authorization: header("authorization"),
            amz_date: header("x-amz-date"),
            body,
        });
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn messages(
    State(fake): State<Fake>,
    Path(app): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.record(format!("/v1/apps/{app}/messages"), &headers, body.clone());
    fake.hold().await;

    if let Some(status) = fake.fail_with {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({ "Message": "simulated failure" })),
        );
    }

    let result: serde_json::Map<String, Value> = body["Addresses"]
        .as_object()
        .unwrap()
        .keys()
        .map(|address| {
            (
                address.clone(),
                json!({ "DeliveryStatus": "SUCCESSFUL", "StatusCode": 200, "MessageId": "m-1" }),
            )
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "ApplicationId": app, "RequestId": "req-1", "Result": result })),
    )
}

async fn voice(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.record("/v1/sms-voice/voice/message".into(), &headers, body);
    fake.hold().await;
    match fake.fail_with {
        Some(status) => (StatusCode::from_u16(status).unwrap(), Json(json!({}))),
        None => (StatusCode::OK, Json(json!({ "MessageId": "voice-1" }))),
    }
}

pub async fn start(fake: Fake) -> String {
    let app = Router::new()
        .route("/v1/apps/{app}/messages", post(messages))
        .route("/v1/sms-voice/voice/message", post(voice))
        .with_state(fake);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

pub fn provider_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        application_id: "app-123".into(),
        access_key_id: "AKIDEXAMPLE".into(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
        pinpoint_endpoint: Some(base_url.to_string()),
        sms_voice_endpoint: Some(base_url.to_string()),
        ..ProviderConfig::default()
    }
}
