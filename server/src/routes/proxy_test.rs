use super::*;
use crate::state::test_helpers;

#[test]
fn not_configured_maps_to_503() {
    let resp = upstream_error_response(&UpstreamError::NotConfigured("market"));
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn upstream_failures_map_to_502() {
    assert_eq!(upstream_error_response(&UpstreamError::Status(500)).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(upstream_error_response(&UpstreamError::Request("reset".into())).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(upstream_error_response(&UpstreamError::Parse("html".into())).status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn coordinate_bounds() {
    assert!(valid_coords(12.97, 77.59));
    assert!(valid_coords(-90.0, 180.0));
    assert!(!valid_coords(91.0, 0.0));
    assert!(!valid_coords(0.0, -180.5));
    assert!(!valid_coords(f64::NAN, 0.0));
}

#[test]
fn non_blank_filters_whitespace() {
    assert_eq!(non_blank(Some("  RICE ")), Some("RICE"));
    assert_eq!(non_blank(Some("   ")), None);
    assert_eq!(non_blank(None), None);
}

#[tokio::test]
async fn blank_city_is_400() {
    let state = test_helpers::test_app_state();
    let resp = geocode(State(state), Query(GeocodeQuery { q: "  ".into() })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_weather_resource_is_404() {
    let state = test_helpers::test_app_state();
    let resp = weather(State(state), Path("onecall".into()), Query(CoordsQuery { lat: 0.0, lon: 0.0 })).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unconfigured_weather_is_503() {
    let state = test_helpers::test_app_state();
    let resp = weather(State(state), Path("current".into()), Query(CoordsQuery { lat: 12.0, lon: 77.0 })).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unconfigured_feeds_are_503() {
    let state = test_helpers::test_app_state();
    assert_eq!(news(State(state.clone())).await.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(schemes(State(state)).await.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unreachable_upstream_is_502() {
    let mut config = test_helpers::unconfigured_upstream();
    config.market_api_key = Some("k".into());
    let state = test_helpers::test_app_state_with_upstream(config);
    let resp = market(State(state), Query(MarketQuery { commodity: None, state: None })).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
