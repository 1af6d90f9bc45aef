//! HTTP client for the WeatherAPI.com REST API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::WeatherError;
use crate::types::WeatherReport;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl WeatherClient {
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`WeatherError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("wandsky-gateway/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WeatherError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Current conditions plus a `days`-day forecast for `city`.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::CityNotFound`] on a 400 or 404 answer.
    /// - [`WeatherError::Upstream`] on any other non-2xx status (bad key, quota).
    /// - [`WeatherError::Http`] on network failure.
    /// - [`WeatherError::Deserialize`] if the body does not match [`WeatherReport`].
    pub async fn forecast(&self, city: &str, days: u8) -> Result<WeatherReport, WeatherError> {
        let url = self.forecast_url(city, days);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            return Err(match status.as_u16() {
                400 | 404 => WeatherError::CityNotFound {
                    city: city.to_owned(),
                    status: status.as_u16(),
                    message,
                },
                other => WeatherError::Upstream {
                    status: other,
                    message,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
            context: format!("forecast(q={city})"),
            source: e,
        })
    }

    fn forecast_url(&self, city: &str, days: u8) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["v1", "forecast.json"]);
        }
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("q", city)
            .append_pair("days", &days.to_string())
            .append_pair("aqi", "no")
            .append_pair("alerts", "no");
        url
    }
}

/// WeatherAPI errors look like `{"error":{"code":1006,"message":"No matching location found."}}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "weather request failed".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_url_encodes_city_and_params() {
        let client = WeatherClient::new("k", "https://api.weatherapi.com/", 5).expect("client");
        let url = client.forecast_url("Milford Sound", 3);
        assert_eq!(
            url.as_str(),
            "https://api.weatherapi.com/v1/forecast.json?key=k&q=Milford+Sound&days=3&aqi=no&alerts=no"
        );
    }

    #[test]
    fn error_message_reads_weatherapi_shape() {
        assert_eq!(
            error_message(r#"{"error":{"code":1006,"message":"No matching location found."}}"#),
            "No matching location found."
        );
        assert_eq!(error_message("gateway timeout"), "weather request failed");
    }
}
