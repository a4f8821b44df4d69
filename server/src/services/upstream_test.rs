use super::*;

fn config() -> UpstreamConfig {
    UpstreamConfig {
        openweather_api_key: Some("ow-key".into()),
        openweather_base_url: "https://weather.test".into(),
        market_api_key: Some("mk-key".into()),
        market_resource_id: "res-1".into(),
        market_base_url: "https://market.test/resource".into(),
        news_url: Some("https://news.test/v2/everything?q=agriculture&apiKey=n".into()),
        schemes_url: None,
        timeout_secs: 5,
    }
}

fn query(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

// =============================================================================
// WeatherResource
// =============================================================================

#[test]
fn weather_resource_parses_path_segments() {
    assert_eq!(WeatherResource::from_segment("current"), Some(WeatherResource::Current));
    assert_eq!(WeatherResource::from_segment("forecast"), Some(WeatherResource::Forecast));
    assert_eq!(WeatherResource::from_segment("air"), Some(WeatherResource::Air));
    assert_eq!(WeatherResource::from_segment("onecall"), None);
}

// =============================================================================
// URL builders
// =============================================================================

#[test]
fn geocode_url_encodes_city_and_limits_to_one() {
    let url = config().geocode_url("New Delhi").unwrap();
    assert_eq!(url.path(), "/geo/1.0/direct");
    assert_eq!(query(&url, "q").as_deref(), Some("New Delhi"));
    assert_eq!(query(&url, "limit").as_deref(), Some("1"));
    assert_eq!(query(&url, "appid").as_deref(), Some("ow-key"));
}

#[test]
fn forecast_url_uses_metric_units() {
    let url = config()
        .weather_url(WeatherResource::Forecast, 12.97, 77.59)
        .unwrap();
    assert_eq!(url.path(), "/data/2.5/forecast");
    assert_eq!(query(&url, "lat").as_deref(), Some("12.97"));
    assert_eq!(query(&url, "lon").as_deref(), Some("77.59"));
    assert_eq!(query(&url, "units").as_deref(), Some("metric"));
}

#[test]
fn air_url_has_no_units() {
    let url = config().weather_url(WeatherResource::Air, 1.0, 2.0).unwrap();
    assert_eq!(url.path(), "/data/2.5/air_pollution");
    assert_eq!(query(&url, "units"), None);
}

#[test]
fn weather_without_key_is_not_configured() {
    let cfg = UpstreamConfig { openweather_api_key: None, ..config() };
    assert!(matches!(cfg.geocode_url("Mysuru"), Err(UpstreamError::NotConfigured("weather"))));
    assert!(matches!(
        cfg.weather_url(WeatherResource::Current, 0.0, 0.0),
        Err(UpstreamError::NotConfigured("weather"))
    ));
}

#[test]
fn market_url_unfiltered() {
    let url = config().market_url(None, None).unwrap();
    assert_eq!(url.path(), "/resource/res-1");
    assert_eq!(query(&url, "api-key").as_deref(), Some("mk-key"));
    assert_eq!(query(&url, "format").as_deref(), Some("json"));
    assert_eq!(query(&url, "limit").as_deref(), Some("500"));
    assert_eq!(query(&url, "filters[commodity]"), None);
}

#[test]
fn market_url_with_filters() {
    let url = config().market_url(Some("RICE"), Some("KARNATAKA")).unwrap();
    assert_eq!(query(&url, "filters[commodity]").as_deref(), Some("RICE"));
    assert_eq!(query(&url, "filters[state]").as_deref(), Some("KARNATAKA"));
}

#[test]
fn news_url_passes_through_and_schemes_is_optional() {
    let cfg = config();
    assert_eq!(query(&cfg.news_url().unwrap(), "q").as_deref(), Some("agriculture"));
    assert!(matches!(cfg.schemes_url(), Err(UpstreamError::NotConfigured("schemes"))));
}

#[test]
fn malformed_feed_url_is_reported() {
    let cfg = UpstreamConfig { schemes_url: Some("not a url".into()), ..config() };
    assert!(matches!(cfg.schemes_url(), Err(UpstreamError::Url(_))));
}
