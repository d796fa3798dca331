//! Token provider: OAuth2 client-credentials grant against the authority

use crate::errors::ApiError;
use crate::state::AppState;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use http::StatusCode;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while acquiring a credential
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to send token request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Token endpoint rejected the client credentials with status: {0}")]
    Rejected(StatusCode),
    #[error("Failed to parse token response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Request(_) => ApiError::bad_gateway("Token endpoint unreachable"),
            TokenError::Rejected(status) => {
                ApiError::bad_gateway(format!("Token request failed with status: {}", status))
            }
            TokenError::Parse(e) => {
                ApiError::internal(format!("Failed to parse token response: {}", e))
            }
        }
    }
}

/// Bearer credential obtained from the token endpoint. Created fresh for
/// every consent operation and discarded after the request.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Vec<String>,
}

impl Credential {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Wire format of the token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Perform a client-credentials grant and return the resulting credential.
///
/// One outbound call per invocation, no retry: a transport failure, a
/// timeout, or a non-success status aborts the consent operation.
pub async fn acquire_credential(state: &AppState) -> Result<Credential, TokenError> {
    let oauth = &state.config.oauth;
    debug!("Fetching fresh token from {}", oauth.token_endpoint);

    let scope = oauth.scope_list().join(" ");
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", oauth.client_id.as_str()),
        ("client_secret", oauth.client_secret.as_str()),
        ("scope", scope.as_str()),
    ];

    let response = state
        .http
        .post(&oauth.token_endpoint)
        .timeout(Duration::from_secs(oauth.token_timeout))
        .form(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TokenError::Rejected(response.status()));
    }

    let body = response.bytes().await?;
    let token: TokenResponse = serde_json::from_slice(&body)?;

    debug!(
        "Got access token for client '{}', expires in {:?}s",
        oauth.client_id, token.expires_in
    );

    Ok(Credential {
        access_token: token.access_token,
        expires_at: token
            .expires_in
            .map(|secs| Utc::now() + ChronoDuration::seconds(secs)),
        scope: token
            .scope
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    async fn test_state(token_mock: &MockServer, authority_mock: &MockServer) -> AppState {
        let config = ServerConfig::for_test_with_mocks(token_mock, authority_mock);
        AppState::new(config).expect("Failed to create test state")
    }

    #[tokio::test]
    async fn test_acquire_credential_sends_client_credentials_grant() {
        let token_mock = MockServer::start().await;
        let authority_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/oauth2/token"))
            .and(matchers::body_string_contains("grant_type=client_credentials"))
            .and(matchers::body_string_contains("client_id=test-client"))
            .and(matchers::body_string_contains("client_secret=test-secret"))
            .and(matchers::body_string_contains("scope=hydra.consent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "test-token",
                "token_type": "bearer",
                "expires_in": 3600,
                "scope": "hydra.consent"
            })))
            .expect(1)
            .mount(&token_mock)
            .await;

        let state = test_state(&token_mock, &authority_mock).await;
        let credential = acquire_credential(&state)
            .await
            .expect("Failed to acquire credential");

        assert_eq!(credential.access_token, "test-token");
        assert_eq!(credential.bearer(), "Bearer test-token");
        assert_eq!(credential.scope, vec!["hydra.consent"]);
        assert!(credential.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_acquire_credential_rejected() {
        let token_mock = MockServer::start().await;
        let authority_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&token_mock)
            .await;

        let state = test_state(&token_mock, &authority_mock).await;
        let err = acquire_credential(&state)
            .await
            .expect_err("Expected token rejection");

        assert!(matches!(
            &err,
            TokenError::Rejected(status) if *status == StatusCode::UNAUTHORIZED
        ));
        let api_err = ApiError::from(err);
        assert_eq!(api_err.status_code, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_acquire_credential_without_expiry() {
        let token_mock = MockServer::start().await;
        let authority_mock = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "short-token",
                "token_type": "bearer"
            })))
            .mount(&token_mock)
            .await;

        let state = test_state(&token_mock, &authority_mock).await;
        let credential = acquire_credential(&state)
            .await
            .expect("Failed to acquire credential");

        assert_eq!(credential.access_token, "short-token");
        assert!(credential.expires_at.is_none());
        assert!(credential.scope.is_empty());
    }
}
