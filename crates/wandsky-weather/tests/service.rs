//! Fallback behaviour of `WeatherService` against a wiremock WeatherAPI.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wandsky_weather::{WeatherClient, WeatherError, WeatherService};

fn forecast_body(city: &str) -> serde_json::Value {
    json!({
        "location": { "name": city, "region": "", "country": "New Zealand", "lat": -36.85, "lon": 174.76 },
        "current": {
            "temp_c": 18.0,
            "is_day": 1,
            "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/116.png", "code": 1003 },
            "wind_kph": 12.2,
            "humidity": 72
        },
        "forecast": {
            "forecastday": [{
                "date": "2026-10-19",
                "day": {
                    "maxtemp_c": 19.5,
                    "mintemp_c": 12.1,
                    "daily_chance_of_rain": 40,
                    "condition": { "text": "Light rain", "icon": "//cdn.weatherapi.com/296.png", "code": 1183 }
                }
            }]
        }
    })
}

fn service(server: &MockServer) -> WeatherService {
    let client = WeatherClient::new("test-key", &server.uri(), 5).expect("client");
    WeatherService::new(client, "Auckland")
}

#[tokio::test]
async fn known_destination_resolves_to_english_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "Queenstown"))
        .and(query_param("key", "test-key"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Queenstown")))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = service(&server)
        .lookup("皇后镇", None)
        .await
        .expect("lookup");

    assert_eq!(lookup.city, "Queenstown");
    assert_eq!(lookup.requested_city, "皇后镇");
    assert!(!lookup.using_fallback);
    assert_eq!(lookup.report.location.name, "Queenstown");
}

#[tokio::test]
async fn rejected_city_falls_back_to_auckland() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "Auckland"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Auckland")))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = service(&server)
        .lookup("Atlantis", Some(1))
        .await
        .expect("fallback lookup");

    assert!(lookup.using_fallback);
    assert_eq!(lookup.city, "Auckland");
    assert_eq!(lookup.requested_city, "Atlantis");
    assert_eq!(lookup.report.location.name, "Auckland");

    let json = serde_json::to_value(&lookup).expect("json");
    assert_eq!(json["usingFallback"], true);
    assert_eq!(json["location"]["name"], "Auckland");
}

#[tokio::test]
async fn fallback_city_itself_failing_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = service(&server).lookup("auckland", None).await.unwrap_err();
    assert!(
        matches!(err, WeatherError::CityNotFound { status: 404, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn bad_api_key_is_not_a_fallback_case() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = service(&server).lookup("Nelson", None).await.unwrap_err();
    assert!(
        matches!(err, WeatherError::Upstream { status: 401, ref message } if message == "API key is invalid."),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn forecast_days_are_clamped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Wellington")))
        .expect(1)
        .mount(&server)
        .await;

    service(&server)
        .lookup("wellington", Some(14))
        .await
        .expect("lookup");
}
