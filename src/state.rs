//! Shared request state.

use std::sync::Arc;

use crate::config::Settings;
use crate::external::pinpoint::MessagingProvider;
use crate::services::{MessagingService, Services};

/// State handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Read-only after startup
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings, provider: Arc<dyn MessagingProvider>) -> Self {
        let messaging = MessagingService::new(
            provider,
            settings.provider.application_id.as_str(),
            settings.messaging.clone(),
        );

        Self {
            services: Services::new(messaging),
            settings: Arc::new(settings),
        }
    }
}
