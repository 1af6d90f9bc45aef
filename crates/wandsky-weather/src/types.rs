//! WeatherAPI.com `forecast.json` response types.
//!
//! Only the fields the site renders are modelled. Field names follow
//! WeatherAPI's snake_case so the payload can be relayed unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: Current,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tz_id: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub code: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Current {
    #[serde(default)]
    pub last_updated: Option<String>,
    pub temp_c: f64,
    #[serde(default)]
    pub feelslike_c: Option<f64>,
    #[serde(default)]
    pub is_day: u8,
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: Option<String>,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub uv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    #[serde(default)]
    pub avgtemp_c: Option<f64>,
    #[serde(default)]
    pub daily_chance_of_rain: Option<u8>,
    pub condition: Condition,
}
