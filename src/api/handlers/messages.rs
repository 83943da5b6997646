//! Dispatch endpoints.
//!
//! Each handler validates, sends through the messaging service and maps the
//! outcome to the channel's fixed envelope. Failure details only reach the
//! logs.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::MESSAGING_TAG;
use crate::api::dto::{
    DispatchResult, SendEmailRequest, SendTextMessageRequest, SendVoiceMessageRequest,
};
use crate::services::messaging::{Channel, DispatchError};
use crate::state::AppState;

/// Routes:
/// - POST /SendTextMessage
/// - POST /SendVoiceMessage
/// - POST /SendEmail
pub fn message_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_text_message))
        .routes(routes!(send_voice_message))
        .routes(routes!(send_email))
}

/// Send a single SMS
#[utoipa::path(
    post,
    path = "/SendTextMessage",
    tag = MESSAGING_TAG,
    request_body = SendTextMessageRequest,
    responses(
        (status = 200, description = "SMS accepted by the provider", body = DispatchResult),
        (status = 400, description = "Rejected or not delivered", body = DispatchResult)
    )
)]
async fn send_text_message(
    State(state): State<AppState>,
    payload: Result<Json<SendTextMessageRequest>, JsonRejection>,
) -> DispatchResult {
    respond(Channel::Sms, dispatch_text(&state, payload).await)
}

async fn dispatch_text(
    state: &AppState,
    payload: Result<Json<SendTextMessageRequest>, JsonRejection>,
) -> Result<(), DispatchError> {
    let Json(request) = payload.map_err(reject_body)?;
    let message = request.into_message()?;
    state.services.messaging.send_text(&message).await
}

/// Send a single voice call
#[utoipa::path(
    post,
    path = "/SendVoiceMessage",
    tag = MESSAGING_TAG,
    request_body = SendVoiceMessageRequest,
    responses(
        (status = 200, description = "Voice message accepted by the provider", body = DispatchResult),
        (status = 400, description = "Rejected or not delivered", body = DispatchResult)
    )
)]
async fn send_voice_message(
    State(state): State<AppState>,
    payload: Result<Json<SendVoiceMessageRequest>, JsonRejection>,
) -> DispatchResult {
    respond(Channel::Voice, dispatch_voice(&state, payload).await)
}

async fn dispatch_voice(
    state: &AppState,
    payload: Result<Json<SendVoiceMessageRequest>, JsonRejection>,
) -> Result<(), DispatchError> {
    let Json(request) = payload.map_err(reject_body)?;
    let message = request.into_message()?;
    state.services.messaging.send_voice(&message).await
}

/// Send a single email
#[utoipa::path(
    post,
    path = "/SendEmail",
    tag = MESSAGING_TAG,
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email accepted by the provider", body = DispatchResult),
        (status = 400, description = "Rejected or not delivered", body = DispatchResult)
    )
)]
async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> DispatchResult {
    respond(Channel::Email, dispatch_email(&state, payload).await)
}

async fn dispatch_email(
    state: &AppState,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<(), DispatchError> {
    let Json(request) = payload.map_err(reject_body)?;
    let message = request.into_message()?;
    state.services.messaging.send_email(&message).await
}

fn reject_body(rejection: JsonRejection) -> DispatchError {
    DispatchError::rejected(format!("unreadable body: {}", rejection.body_text()))
}

fn respond(channel: Channel, outcome: Result<(), DispatchError>) -> DispatchResult {
    match outcome {
        Ok(()) => {
            info!(%channel, "message dispatched");
            DispatchResult::success(channel)
        }
        Err(err) => {
            warn!(
                %channel,
                error = %err,
                rejected = err.is_rejection(),
                provider_status = ?err.provider_status(),
                "message not dispatched"
            );
            DispatchResult::failure(channel)
        }
    }
}
