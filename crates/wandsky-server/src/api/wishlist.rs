//! Wishlist routes. Destination ids arrive as slugs or GUIDs and always
//! reach the backend as GUIDs.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wandsky_core::{validation::require, DestinationId};

use super::extract::{ApiJson, ApiPath};
use super::{success, ApiError, AppState, Success};
use crate::auth::{MaybeSession, RequireSession};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddBody {
    destination_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct WishlistCheck {
    is_in_wishlist: bool,
    /// Set when the answer is a default because the backend could not be asked.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    degraded: bool,
}

/// GET /api/wishlist
pub(super) async fn list_wishlist(
    State(state): State<AppState>,
    session: RequireSession,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state.backend.list_wishlist(&session.access_token).await?,
    ))
}

/// POST /api/wishlist
pub(super) async fn add_to_wishlist(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<AddBody>,
) -> Result<(StatusCode, Json<Success<Value>>), ApiError> {
    let raw = require("destinationId", body.destination_id.as_deref())?;
    let guid = DestinationId::parse(raw).to_guid();
    let added = state
        .backend
        .add_to_wishlist(&session.access_token, &guid)
        .await?;
    Ok((StatusCode::CREATED, success(added)))
}

/// DELETE /api/wishlist/{destination_id}
pub(super) async fn remove_from_wishlist(
    State(state): State<AppState>,
    session: RequireSession,
    ApiPath(destination_id): ApiPath<String>,
) -> Result<Json<Success<Value>>, ApiError> {
    let guid = DestinationId::parse(&destination_id).to_guid();
    let removed = state
        .backend
        .remove_from_wishlist(&session.access_token, &guid)
        .await?;
    Ok(success(removed))
}

/// GET /api/wishlist/check/{destination_id}
///
/// Never fails: signed-out callers get `false`, and a backend failure gets
/// `false` flagged as `degraded` so it is distinguishable from a real "no".
pub(super) async fn check_wishlist(
    State(state): State<AppState>,
    session: MaybeSession,
    ApiPath(destination_id): ApiPath<String>,
) -> Json<WishlistCheck> {
    let Some(token) = session.access_token() else {
        return Json(WishlistCheck {
            is_in_wishlist: false,
            degraded: false,
        });
    };

    let guid = DestinationId::parse(&destination_id).to_guid();
    match state.backend.check_wishlist(token, &guid).await {
        Ok(is_in_wishlist) => Json(WishlistCheck {
            is_in_wishlist,
            degraded: false,
        }),
        Err(e) => {
            tracing::warn!(
                error = %e,
                destination = %guid,
                "wishlist check failed; answering not-in-wishlist"
            );
            Json(WishlistCheck {
                is_in_wishlist: false,
                degraded: true,
            })
        }
    }
}
