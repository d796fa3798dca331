use crate::authority::{self, AcceptDirective};
use crate::errors::ApiError;
use crate::openapi::CONSENT_TAG;
use crate::state::AppState;
use crate::token::Credential;
use crate::{token, views};
use axum::{
    extract::{Form, FromRequest, Query, Request, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for both consent entry points
#[derive(Debug, Deserialize, IntoParams)]
pub(super) struct ConsentParams {
    /// Authority-supplied error code, short-circuits to the error view
    error: Option<String>,
    /// Authority-supplied human-readable error description
    error_description: Option<String>,
    /// Opaque ID of the pending consent record
    consent: Option<String>,
}

/// Form fields submitted with the approval decision
#[derive(Debug, Deserialize, ToSchema)]
pub(super) struct AcceptForm {
    scheme: Option<String>,
    identifier: Option<String>,
}

/// Acquire a fresh credential for this request. The relay never reuses
/// tokens across requests.
async fn credential_for_request(state: &AppState) -> Result<Credential, Response> {
    token::acquire_credential(state).await.map_err(|err| {
        log::error!("Token acquisition failed: {}", err);
        ApiError::from(err).into_response()
    })
}

/// Render a pending consent record for the user's decision
#[utoipa::path(
    get,
    path = "/consent",
    tag = CONSENT_TAG,
    params(ConsentParams),
    responses(
        (status = 200, description = "Rendered consent or error view", body = String),
        (status = 502, description = "Token endpoint or consent authority failure")
    )
)]
pub(super) async fn consent_get(
    State(state): State<AppState>,
    Query(params): Query<ConsentParams>,
) -> Response {
    // Authority-reported errors are passed through verbatim, without
    // any upstream call
    if let Some(error) = params.error {
        return Html(views::error_page(
            &error,
            params.error_description.as_deref(),
        ))
        .into_response();
    }

    let Some(consent_id) = params.consent else {
        return Html(views::error_page(
            "no consent id",
            Some("No consent ID was given for the request"),
        ))
        .into_response();
    };

    let credential = match credential_for_request(&state).await {
        Ok(credential) => credential,
        Err(response) => return response,
    };

    let consent = match authority::fetch_consent(&state, &credential, &consent_id).await {
        Ok(consent) => consent,
        Err(err) => {
            log::error!("Failed to fetch consent '{}': {}", consent_id, err);
            return ApiError::from(err).into_response();
        }
    };

    Html(views::consent_page(&consent_id, &consent)).into_response()
}

/// Accept a pending consent record and redirect to the authority's
/// continuation URL
#[utoipa::path(
    post,
    path = "/consent",
    tag = CONSENT_TAG,
    params(ConsentParams),
    request_body(content = AcceptForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Consent accepted, redirect to the authority-provided URL"),
        (status = 200, description = "Missing consent ID, plain-text rejection"),
        (status = 400, description = "Missing or malformed scheme/identifier form fields"),
        (status = 502, description = "Token endpoint or consent authority failure")
    )
)]
pub(super) async fn consent_post(
    State(state): State<AppState>,
    Query(params): Query<ConsentParams>,
    request: Request,
) -> Response {
    // Unlike the GET entry point this answers with plain text, a
    // long-standing quirk that clients of this app rely on. The check
    // comes before any look at the body, so even a bodyless POST gets
    // this answer.
    let Some(consent_id) = params.consent else {
        return "no consent id".into_response();
    };

    let credential = match credential_for_request(&state).await {
        Ok(credential) => credential,
        Err(response) => return response,
    };

    // Re-fetch the record; the relay is stateless across requests and
    // never accepts a consent it could not fetch
    let consent = match authority::fetch_consent(&state, &credential, &consent_id).await {
        Ok(consent) => consent,
        Err(err) => {
            log::error!("Failed to fetch consent '{}': {}", consent_id, err);
            return ApiError::from(err).into_response();
        }
    };

    // The form is parsed only now, after the record is known to exist
    let form = match Form::<AcceptForm>::from_request(request, &()).await {
        Ok(Form(form)) => form,
        Err(err) => {
            log::debug!("Rejected malformed consent submission: {}", err);
            return ApiError::bad_request("Malformed form submission").into_response();
        }
    };

    let (Some(scheme), Some(identifier)) = (form.scheme, form.identifier) else {
        return ApiError::bad_request("Missing 'scheme' or 'identifier' form field")
            .into_response();
    };

    // The full requested scope set is always granted, there is no
    // selective scope negotiation
    let directive = AcceptDirective {
        grant_scopes: consent.requested_scopes.clone(),
        subject: format!("{}:{}", scheme, identifier),
    };

    if let Err(err) = authority::accept_consent(&state, &credential, &consent_id, &directive).await
    {
        log::error!("Failed to accept consent '{}': {}", consent_id, err);
        return ApiError::from(err).into_response();
    }

    Redirect::to(&consent.redirect_url).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/consent", get(consent_get))
        .route("/consent", post(consent_post))
}
