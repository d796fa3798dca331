use crate::config::ServerConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

/// Test fixture wiring the app router to wiremock stand-ins for the
/// token endpoint and the consent authority.
///
/// Tests mount their own `Mock`s on `token_mock` / `authority_mock` and
/// drive the router in-process via `tower::ServiceExt::oneshot`, so no
/// real sockets are involved on the app side.
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Mock server playing the OAuth2 token endpoint
    pub token_mock: MockServer,
    /// Mock server playing the consent authority
    pub authority_mock: MockServer,
}

impl TestFixture {
    pub async fn new() -> Self {
        // Initialize test logger
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let token_mock = MockServer::start().await;
        let authority_mock = MockServer::start().await;

        let config = ServerConfig::for_test_with_mocks(&token_mock, &authority_mock);
        let state = AppState::new(config).expect("Failed to create test state");
        let app = create_app(state).await;

        Self {
            app,
            token_mock,
            authority_mock,
        }
    }

    /// Sends a GET request to the specified URI
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri.as_ref())
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with no body and no content type
    pub async fn post_empty(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri.as_ref())
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with an urlencoded form body to the
    /// specified URI
    pub async fn post_form(&self, uri: impl AsRef<str>, form: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri.as_ref())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.into()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a raw request through the router and collects the response
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Captured response: status, headers and the full body
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Asserts the response has a success status
    pub fn assert_ok(&self) {
        assert!(
            self.status.is_success(),
            "Expected success status, got {} with body: {}",
            self.status,
            self.text()
        );
    }

    /// The response body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// The response body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not valid JSON")
    }

    /// A response header as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
