//! Client for the consent authority: fetch and accept consent records

use crate::errors::ApiError;
use crate::state::AppState;
use crate::token::Credential;
use http::header::AUTHORIZATION;
use http::StatusCode;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when calling the consent authority
#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("Failed to send request to the consent authority: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Consent authority request failed with status: {0}")]
    InvalidStatus(StatusCode),
    #[error("Failed to parse consent authority response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<AuthorityError> for ApiError {
    fn from(err: AuthorityError) -> Self {
        match err {
            AuthorityError::Request(_) => ApiError::bad_gateway("Consent authority unreachable"),
            AuthorityError::InvalidStatus(status) => ApiError::bad_gateway(format!(
                "Consent authority request failed with status: {}",
                status
            )),
            AuthorityError::Parse(e) => {
                ApiError::internal(format!("Failed to parse consent record: {}", e))
            }
        }
    }
}

/// A pending consent record held by the authority, identified by an
/// opaque ID. Fetched read-only except for the accept mutation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub requested_scopes: Vec<String>,
    pub redirect_url: String,
}

/// Accept mutation sent back to the authority. The full requested scope
/// set is always granted; the subject names the authenticated end-user
/// as `scheme:identifier`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcceptDirective {
    pub grant_scopes: Vec<String>,
    pub subject: String,
}

/// Fetch the consent record for the given ID from the authority
pub async fn fetch_consent(
    state: &AppState,
    credential: &Credential,
    id: &str,
) -> Result<ConsentRecord, AuthorityError> {
    let url = state.config.authority.consent_url(id);
    debug!("Fetching consent record from: {}", url);

    let response = state
        .http
        .get(&url)
        .header(AUTHORIZATION, credential.bearer())
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AuthorityError::InvalidStatus(response.status()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Issue the accept mutation for a previously fetched consent record
pub async fn accept_consent(
    state: &AppState,
    credential: &Credential,
    id: &str,
    directive: &AcceptDirective,
) -> Result<(), AuthorityError> {
    let url = state.config.authority.accept_url(id);
    debug!(
        "Accepting consent '{}' for subject '{}'",
        id, directive.subject
    );

    let response = state
        .http
        .patch(&url)
        .header(AUTHORIZATION, credential.bearer())
        .json(directive)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AuthorityError::InvalidStatus(response.status()));
    }

    Ok(())
}
