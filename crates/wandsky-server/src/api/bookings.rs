use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use wandsky_backend::CancelBooking;

use super::extract::{ApiJson, ApiPath};
use super::{success, ApiError, AppState, Success};
use crate::auth::RequireSession;

#[derive(Debug, Default, Deserialize)]
pub(super) struct CancelBody {
    reason: Option<String>,
}

/// GET /api/bookings
pub(super) async fn list_bookings(
    State(state): State<AppState>,
    session: RequireSession,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state.backend.list_bookings(&session.access_token).await?,
    ))
}

/// POST /api/bookings/{id}/cancel. The body, and the reason in it, are optional.
pub(super) async fn cancel_booking(
    State(state): State<AppState>,
    session: RequireSession,
    ApiPath(booking_id): ApiPath<String>,
    body: Option<ApiJson<CancelBody>>,
) -> Result<Json<Success<Value>>, ApiError> {
    let reason = body
        .and_then(|ApiJson(b)| b.reason)
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty());

    let cancelled = state
        .backend
        .cancel_booking(&session.access_token, &booking_id, &CancelBooking { reason })
        .await?;
    tracing::info!(
        booking_id = %booking_id,
        user_id = session.claims.user_id.as_deref(),
        "booking cancelled"
    );
    Ok(success(cancelled))
}
