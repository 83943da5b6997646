//! Health probes.
//!
//! None of these call the provider; they only report whether the process
//! is configured well enough to try.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::config::Settings;
use crate::state::AppState;

/// Routes:
/// - GET /health
/// - GET /health/ready
/// - GET /health/live
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Configuration health of the messaging provider.
///
/// Returns 503 with the same body when the service cannot send anything.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy or degraded", body = HealthResponse),
        (status = 503, description = "Unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let provider = check_provider(&state.settings);
    let status = provider.status;

    let mut checks = HashMap::new();
    checks.insert(state.services.messaging.provider_name().to_string(), provider);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (code, Json(response))
}

/// Ready when credentials and a region are configured.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    let provider = &state.settings.provider;
    if provider.has_credentials() && !provider.region.trim().is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn check_provider(settings: &Settings) -> ComponentHealth {
    let provider = &settings.provider;
    if !provider.has_credentials() {
        return unhealthy("no provider credentials configured");
    }
    if provider.application_id.trim().is_empty() {
        return unhealthy("missing provider.application_id");
    }

    let messaging = &settings.messaging;
    let missing: Vec<&str> = [
        ("messaging.sender_address", &messaging.sender_address),
        ("messaging.origination_number", &messaging.origination_number),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(key, _)| key)
    .collect();

    if missing.is_empty() {
        ComponentHealth {
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        ComponentHealth {
            status: HealthStatus::Degraded,
            message: Some(format!("missing {}", missing.join(", "))),
        }
    }
}

fn unhealthy(message: &str) -> ComponentHealth {
    ComponentHealth {
        status: HealthStatus::Unhealthy,
        message: Some(message.to_string()),
    }
}
