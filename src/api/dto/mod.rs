//! Data Transfer Objects for API requests and responses.
//!
//! - `message` - dispatch request bodies and the uniform result envelope
//! - `health` - health probe responses

mod health;
mod message;

pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use message::{DispatchResult, SendEmailRequest, SendTextMessageRequest, SendVoiceMessageRequest};
