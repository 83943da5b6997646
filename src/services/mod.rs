//! Service layer for business logic operations.
//!
//! Services sit between the HTTP handlers and the provider client.

pub mod messaging;

pub use messaging::MessagingService;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; every service shares its state through `Arc`.
#[derive(Clone)]
pub struct Services {
    pub messaging: MessagingService,
}

impl Services {
    pub fn new(messaging: MessagingService) -> Self {
        Self { messaging }
    }
}
