//! City resolution plus the single-retry fallback policy.

use serde::Serialize;

use crate::cities::resolve_city;
use crate::client::WeatherClient;
use crate::error::WeatherError;
use crate::types::WeatherReport;

pub const DEFAULT_FORECAST_DAYS: u8 = 3;
pub const MAX_FORECAST_DAYS: u8 = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherLookup {
    /// The city the report is actually for.
    pub city: String,
    pub requested_city: String,
    pub using_fallback: bool,
    #[serde(flatten)]
    pub report: WeatherReport,
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherClient,
    fallback_city: String,
}

impl WeatherService {
    #[must_use]
    pub fn new(client: WeatherClient, fallback_city: impl Into<String>) -> Self {
        Self {
            client,
            fallback_city: fallback_city.into(),
        }
    }

    /// Looks up weather for a destination id, Chinese display name or city.
    ///
    /// When WeatherAPI does not recognise the resolved city, one more request
    /// is made for the fallback city and the result is flagged
    /// `using_fallback`. No other error is retried.
    ///
    /// # Errors
    ///
    /// Whatever [`WeatherClient::forecast`] returns for the final attempt.
    pub async fn lookup(&self, input: &str, days: Option<u8>) -> Result<WeatherLookup, WeatherError> {
        let days = days
            .unwrap_or(DEFAULT_FORECAST_DAYS)
            .clamp(1, MAX_FORECAST_DAYS);
        let resolved = resolve_city(input);

        match self.client.forecast(&resolved.city, days).await {
            Ok(report) => Ok(WeatherLookup {
                city: resolved.city,
                requested_city: resolved.requested,
                using_fallback: false,
                report,
            }),
            Err(WeatherError::CityNotFound { status, message, .. })
                if !resolved.city.eq_ignore_ascii_case(&self.fallback_city) =>
            {
                tracing::warn!(
                    requested = %resolved.requested,
                    city = %resolved.city,
                    status,
                    message = %message,
                    fallback = %self.fallback_city,
                    "weather city not found; using fallback city"
                );
                let report = self.client.forecast(&self.fallback_city, days).await?;
                Ok(WeatherLookup {
                    city: self.fallback_city.clone(),
                    requested_city: resolved.requested,
                    using_fallback: true,
                    report,
                })
            }
            Err(e) => Err(e),
        }
    }
}
