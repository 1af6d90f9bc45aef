use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use wandsky_core::{
    destinations::{self, DestinationFilter},
    DestinationId,
};

use super::extract::{ApiPath, ApiQuery};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct DestinationsQuery {
    pub id: Option<String>,
    pub region: Option<String>,
    pub q: Option<String>,
}

/// GET /api/destinations: the static catalog, one entry with `?id=`.
pub(super) async fn list_destinations(
    ApiQuery(query): ApiQuery<DestinationsQuery>,
) -> Result<Response, ApiError> {
    if let Some(id) = query.id.as_deref() {
        let destination =
            destinations::find(id).ok_or_else(|| ApiError::not_found("Destination not found"))?;
        return Ok(Json(destination).into_response());
    }

    let filter = DestinationFilter {
        region: query.region.as_deref(),
        query: query.q.as_deref(),
    };
    Ok(Json(destinations::search(&filter)).into_response())
}

/// GET /api/destinations/{id}/reviews: accepts a slug or GUID.
pub(super) async fn destination_reviews(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let guid = DestinationId::parse(&id).to_guid();
    let reviews = state.backend.destination_reviews(&guid).await?;
    Ok(Json(reviews))
}
