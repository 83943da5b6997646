use utoipa::OpenApi;

pub const MESSAGING_TAG: &str = "Messaging";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "notify-gateway",
        description = "Send SMS, voice and email notifications through Amazon Pinpoint",
    ),
    tags(
        (name = MESSAGING_TAG, description = "Single-recipient message dispatch"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
