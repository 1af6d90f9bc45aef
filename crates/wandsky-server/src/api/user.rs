use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use wandsky_backend::{ChangePasswordRequest, ProfileUpdate};
use wandsky_core::validation::{require, validate_confirmation, validate_password};

use super::extract::ApiJson;
use super::{success, ApiError, AppState, Success};
use crate::auth::RequireSession;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChangePasswordBody {
    current_password: Option<String>,
    new_password: Option<String>,
    confirm_password: Option<String>,
}

/// GET /api/user/profile
pub(super) async fn get_profile(
    State(state): State<AppState>,
    session: RequireSession,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.get_profile(&session.access_token).await?))
}

/// PATCH /api/user/profile
pub(super) async fn update_profile(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<Success<Value>>, ApiError> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No profile fields to update"));
    }
    let profile = state
        .backend
        .update_profile(&session.access_token, &update)
        .await?;
    Ok(success(profile))
}

/// POST /api/user/change-password
pub(super) async fn change_password(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<ChangePasswordBody>,
) -> Result<Json<Success<Value>>, ApiError> {
    let current = body.current_password.unwrap_or_default();
    require("currentPassword", Some(&current))?;
    let new = body.new_password.unwrap_or_default();
    require("newPassword", Some(&new))?;
    validate_password("newPassword", &new)?;
    if let Some(confirm) = body.confirm_password.as_deref() {
        validate_confirmation(&new, confirm)?;
    }

    let request = ChangePasswordRequest {
        current_password: current,
        new_password: new,
    };
    let result = state
        .backend
        .change_password(&session.access_token, &request)
        .await?;
    tracing::info!(user_id = session.claims.user_id.as_deref(), "password changed");
    Ok(success(result))
}

/// GET /api/user/preferences
pub(super) async fn get_preferences(
    State(state): State<AppState>,
    session: RequireSession,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state.backend.get_preferences(&session.access_token).await?,
    ))
}

/// PATCH /api/user/preferences: an opaque JSON object.
pub(super) async fn update_preferences(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(preferences): ApiJson<Map<String, Value>>,
) -> Result<Json<Success<Value>>, ApiError> {
    let updated = state
        .backend
        .update_preferences(&session.access_token, &preferences)
        .await?;
    Ok(success(updated))
}
