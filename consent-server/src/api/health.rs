use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness probe response
#[derive(Debug, Serialize, ToSchema)]
pub struct Health {
    status: &'static str,
}

/// Informational banner
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Static informational text", body = String)
    )
)]
async fn index() -> &'static str {
    "This is the consent app"
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = Health)
    )
)]
async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::TestFixture;
    use serde_json::json;

    #[tokio::test]
    async fn test_healthz_body_is_exact() {
        let fixture = TestFixture::new().await;
        let resp = fixture.get("/healthz").await;
        resp.assert_ok();
        // the wire body must be exactly this object, nothing more
        assert_eq!(resp.json(), json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_index_banner() {
        let fixture = TestFixture::new().await;
        let resp = fixture.get("/").await;
        resp.assert_ok();
        assert_eq!(resp.text(), "This is the consent app");
    }
}
