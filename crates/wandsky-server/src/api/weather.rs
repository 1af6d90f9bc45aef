use axum::{extract::State, Json};
use serde::Deserialize;

use wandsky_weather::{WeatherLookup, MAX_FORECAST_DAYS};

use super::extract::{ApiPath, ApiQuery};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct WeatherQuery {
    days: Option<u32>,
}

fn forecast_days(days: Option<u32>) -> Option<u8> {
    days.map(|d| u8::try_from(d).unwrap_or(MAX_FORECAST_DAYS))
}

/// GET /api/weather/{city}: destination id, Chinese name or plain city.
pub(super) async fn get_weather(
    State(state): State<AppState>,
    ApiPath(city): ApiPath<String>,
    ApiQuery(query): ApiQuery<WeatherQuery>,
) -> Result<Json<WeatherLookup>, ApiError> {
    let service = state
        .weather
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Weather service is not configured"))?;
    if city.trim().is_empty() {
        return Err(ApiError::bad_request("city is required"));
    }

    let lookup = service.lookup(&city, forecast_days(query.days)).await?;
    Ok(Json(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_day_counts_saturate() {
        assert_eq!(forecast_days(None), None);
        assert_eq!(forecast_days(Some(2)), Some(2));
        assert_eq!(forecast_days(Some(10_000)), Some(MAX_FORECAST_DAYS));
    }
}
