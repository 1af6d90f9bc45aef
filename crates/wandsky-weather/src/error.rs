use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WeatherAPI answered 400 or 404 for the requested location.
    #[error("no weather data for '{city}' ({status}): {message}")]
    CityNotFound {
        city: String,
        status: u16,
        message: String,
    },

    #[error("weather service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid weather API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
