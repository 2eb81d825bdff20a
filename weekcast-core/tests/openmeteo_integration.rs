//! Integration tests for OpenMeteoProvider using wiremock.
//!
//! These tests run the full fetch → decode → summarize path against a mock
//! forecast endpoint.

use std::time::Duration;

use weekcast_core::{
    Coordinate, FetchError, ForecastProvider, ForecastStore, IconKind, OpenMeteoProvider,
    RefreshError, RefreshOutcome,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2024-12-11 00:00 Europe/Stockholm, as UTC epoch seconds.
const FIRST_DAY_UTC: i64 = 1_733_871_600;

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 59.33,
        "longitude": 18.06,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/Stockholm",
        "current_units": { "time": "unixtime", "interval": "seconds" },
        "current": {
            "time": FIRST_DAY_UTC + 13 * 3600,
            "interval": 900,
            "temperature_2m": 2.6,
            "weather_code": 3
        },
        "hourly": {
            "time": [FIRST_DAY_UTC, FIRST_DAY_UTC + 3600, FIRST_DAY_UTC + 7200],
            "temperature_2m": [0.4, 0.1, -0.3],
            "precipitation": [0.0, 0.0, 0.1]
        },
        "daily": {
            "time": [FIRST_DAY_UTC, FIRST_DAY_UTC + 86400, FIRST_DAY_UTC + 2 * 86400],
            "temperature_2m_max": [15.0, 3.0, 1.2],
            "temperature_2m_min": [5.0, -2.0, -4.8],
            "weather_code": [0, 61, 73]
        }
    })
}

fn provider(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_layout_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current", "temperature_2m,weather_code"))
        .and(query_param("hourly", "temperature_2m,precipitation"))
        .and(query_param("daily", "temperature_2m_max,temperature_2m_min,weather_code"))
        .and(query_param("timeformat", "unixtime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let raw = provider(&mock_server).fetch(Coordinate::default()).await.unwrap();
    let snapshot = raw.decode().unwrap();

    assert_eq!(snapshot.hourly.time.len(), 3);
    assert_eq!(snapshot.daily.time.len(), 3);
    assert_eq!(snapshot.daily.temperature_max, vec![15.0, 3.0, 1.2]);
    assert_eq!(snapshot.current.weather_code, 3.0);
}

#[tokio::test]
async fn test_store_refresh_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let store =
        ForecastStore::new(Box::new(provider(&mock_server)), Coordinate::default(), "Stockholm");

    let outcome = store.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Updated);

    let forecast = store.latest();
    assert_eq!(forecast.current.location, "Stockholm");
    assert_eq!(forecast.current.temperature, 2);
    assert_eq!(forecast.current.icon(), IconKind::PartlyCloudy);

    let days: Vec<_> = forecast.week.iter().map(|d| d.day_of_week()).collect();
    let temps: Vec<_> = forecast.week.iter().map(|d| d.temperature).collect();
    let icons: Vec<_> = forecast.week.iter().map(|d| d.icon()).collect();

    assert_eq!(days, vec!["Wed", "Thu", "Fri"]);
    assert_eq!(temps, vec![10, 0, -1]);
    assert_eq!(icons, vec![IconKind::Clear, IconKind::Rain, IconKind::Snow]);
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch(Coordinate::default()).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Latitude must be in range"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_refresh_keeps_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let store =
        ForecastStore::new(Box::new(provider(&mock_server)), Coordinate::default(), "Stockholm");

    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Fetch(FetchError::Json(_))));
    assert_eq!(store.latest().current.location, "Earth");
    assert!(store.latest().week.is_empty());
}
