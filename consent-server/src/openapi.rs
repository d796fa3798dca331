use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const CONSENT_TAG: &str = "Consent API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = CONSENT_TAG, description = "Consent retrieval and accept endpoints"),
    ),
    info(
        title = "Consent App API",
        description = "OAuth2 consent relay front-end",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
