//! Registration, sign-in callbacks, session reads and sign-out.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use wandsky_backend::RegisterRequest;
use wandsky_core::validation::{require, validate_confirmation, validate_email, validate_password};

use super::extract::ApiJson;
use super::{ApiError, AppState};
use crate::auth::{
    credentials::authorize_credentials,
    google::{google_sign_in_callback, GoogleAuthError},
    session::{CREDENTIALS_PROVIDER, GOOGLE_PROVIDER},
    MaybeSession, OAuthAccount, Session, SignedInUser,
};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterBody {
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CredentialsBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GoogleCallbackBody {
    code: Option<String>,
    redirect_uri: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Provider {
    id: &'static str,
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    callback_url: &'static str,
}

impl From<GoogleAuthError> for ApiError {
    fn from(error: GoogleAuthError) -> Self {
        match error {
            GoogleAuthError::Rejected { .. } => {
                ApiError::unauthorized_with("Google authorization failed")
            }
            GoogleAuthError::MissingEmail => {
                ApiError::unauthorized_with("Google account has no email address")
            }
            GoogleAuthError::Http(e) => {
                tracing::error!(error = %e, "google oauth request failed");
                ApiError::internal()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
pub(super) async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let email = require("email", body.email.as_deref())?;
    validate_email(email)?;
    let password = body.password.as_deref().unwrap_or_default();
    require("password", Some(password))?;
    validate_password("password", password)?;
    let confirm = body.confirm_password.as_deref().unwrap_or_default();
    require("confirmPassword", Some(confirm))?;
    validate_confirmation(password, confirm)?;
    let first_name = require("firstName", body.first_name.as_deref())?;
    let last_name = require("lastName", body.last_name.as_deref())?;

    let request = RegisterRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone: body
            .phone
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty()),
    };

    let created = state.backend.register(&request).await?;
    tracing::info!("account registered");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/auth/callback/credentials
pub(super) async fn credentials_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<CredentialsBody>,
) -> Result<(CookieJar, Json<Session>), ApiError> {
    let email = require("email", body.email.as_deref())?;
    let password = body.password.as_deref().unwrap_or_default();
    require("password", Some(password))?;

    let user = authorize_credentials(&state.backend, email, password).await?;
    let (claims, token) = state.sessions.issue(SignedInUser::from(user), None)?;
    tracing::info!(provider = CREDENTIALS_PROVIDER, "signed in");

    Ok((
        jar.add(state.sessions.cookie(token)),
        Json(Session::from_claims(&claims)),
    ))
}

/// POST /api/auth/callback/google
///
/// Exchanges the authorization code, fetches the Google profile and asks the
/// backend to accept it. Any backend refusal is a 403.
pub(super) async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<GoogleCallbackBody>,
) -> Result<(CookieJar, Json<Session>), ApiError> {
    let google = state
        .google
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Google sign-in is not configured"))?;
    let code = require("code", body.code.as_deref())?;
    let redirect_uri = require("redirectUri", body.redirect_uri.as_deref())?;

    let google_token = google.exchange_code(code, redirect_uri).await?;
    let info = google.user_info(&google_token).await?;
    let profile = info.to_profile()?;

    let user = google_sign_in_callback(&state.backend, &profile)
        .await
        .ok_or_else(ApiError::access_denied)?;

    let account = OAuthAccount {
        provider: GOOGLE_PROVIDER,
        provider_account_id: info.sub,
        access_token: Some(google_token),
    };
    let (claims, token) = state
        .sessions
        .issue(SignedInUser::from(user), Some(&account))?;
    tracing::info!(provider = GOOGLE_PROVIDER, "signed in");

    Ok((
        jar.add(state.sessions.cookie(token)),
        Json(Session::from_claims(&claims)),
    ))
}

/// GET /api/auth/session: the current session, or `{}` when signed out.
/// A valid session is re-issued so active users stay signed in.
pub(super) async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
    MaybeSession(claims): MaybeSession,
) -> Result<Response, ApiError> {
    let Some(claims) = claims else {
        return Ok(Json(json!({})).into_response());
    };
    let (claims, token) = state.sessions.refresh(claims)?;
    Ok((
        jar.add(state.sessions.cookie(token)),
        Json(Session::from_claims(&claims)),
    )
        .into_response())
}

/// POST /api/auth/signout
pub(super) async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    (
        jar.add(state.sessions.removal_cookie()),
        Json(json!({ "success": true })),
    )
}

/// GET /api/auth/providers
pub(super) async fn providers(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Provider>> {
    let mut providers = BTreeMap::new();
    providers.insert(
        CREDENTIALS_PROVIDER,
        Provider {
            id: CREDENTIALS_PROVIDER,
            name: "Credentials",
            kind: "credentials",
            callback_url: "/api/auth/callback/credentials",
        },
    );
    if state.google.is_some() {
        providers.insert(
            GOOGLE_PROVIDER,
            Provider {
                id: GOOGLE_PROVIDER,
                name: "Google",
                kind: "oauth",
                callback_url: "/api/auth/callback/google",
            },
        );
    }
    Json(providers)
}
