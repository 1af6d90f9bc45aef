pub mod cities;
pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use cities::{resolve_city, ResolvedCity};
pub use client::WeatherClient;
pub use error::WeatherError;
pub use service::{WeatherLookup, WeatherService, DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};
pub use types::WeatherReport;
