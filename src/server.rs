//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::external::pinpoint::PinpointClient;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Provider client construction errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        log_configuration(&self.settings);

        let provider = PinpointClient::new(&self.settings.provider)
            .context("failed to build provider client")?;
        tracing::info!(
            messages_endpoint = %self.settings.provider.pinpoint_base_url(),
            voice_endpoint = %self.settings.provider.sms_voice_base_url(),
            "Provider client initialized"
        );

        let address = self.settings.server.address();
        let state = AppState::new(self.settings, Arc::new(provider));
        let router = create_router(state);

        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Secrets are never logged; only whether they are present.
fn log_configuration(settings: &Settings) {
    tracing::info!(
        app_name = %settings.application.name,
        app_version = %settings.application.version,
        environment = %Environment::from_env(),
        "Application starting"
    );

    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        "Server configuration loaded"
    );

    let provider = &settings.provider;
    tracing::info!(
        region = %provider.region,
        application_id = %provider.application_id,
        credentials_configured = provider.has_credentials(),
        session_token = provider.session_token.is_some(),
        request_timeout = provider.request_timeout,
        connect_timeout = provider.connect_timeout,
        "Provider configuration loaded"
    );

    let messaging = &settings.messaging;
    tracing::info!(
        language_code = %messaging.language_code,
        default_voice_id = %messaging.default_voice_id,
        charset = %messaging.charset,
        sender_configured = !messaging.sender_address.is_empty(),
        origination_configured = !messaging.origination_number.is_empty(),
        "Messaging defaults loaded"
    );

    if !provider.has_credentials() {
        tracing::warn!("No provider credentials configured; every dispatch will fail");
    }
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
