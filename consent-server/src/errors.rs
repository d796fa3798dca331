//! HTTP-facing errors for the consent relay.
//!
//! Three failure classes reach the user agent: malformed submissions
//! (missing `scheme`/`identifier`, non-form bodies) as 400, failed
//! calls to the token endpoint or the consent authority as 502, and
//! undecodable authority responses as 500. Missing consent IDs and
//! authority-supplied `error` parameters are not errors at this level;
//! the consent handlers answer those with rendered views or plain
//! text.

use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub detail: String,
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn new<S: ToString>(detail: S, status_code: StatusCode) -> Self {
        Self {
            detail: detail.to_string(),
            status_code,
        }
    }

    /// Internal Server Error (500)
    pub fn internal<S: ToString>(detail: S) -> Self {
        Self::new(detail, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Bad Request (400), for malformed user submissions
    pub fn bad_request<S: ToString>(detail: S) -> Self {
        Self::new(detail, StatusCode::BAD_REQUEST)
    }

    /// Bad Gateway (502), for failed upstream calls
    pub fn bad_gateway<S: ToString>(detail: S) -> Self {
        Self::new(detail, StatusCode::BAD_GATEWAY)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = json!({
            "detail": self.detail,
        });
        (status_code, Json(body)).into_response()
    }
}
