use super::*;

#[test]
fn weather_endpoint_formats_resource_path() {
    assert_eq!(weather_endpoint("forecast"), "/api/weather/forecast");
}

#[test]
fn coord_params_name_lat_then_lon() {
    let params = coord_params(Coords { lat: 12.97, lon: 77.59 });
    assert_eq!(params, [("lat", "12.97".to_owned()), ("lon", "77.59".to_owned())]);
}

#[test]
fn market_params_uppercase_and_trim() {
    assert_eq!(
        market_params(Some(" rice "), Some("karnataka")),
        vec![("commodity", "RICE".to_owned()), ("state", "KARNATAKA".to_owned())]
    );
}

#[test]
fn market_params_skip_blank_filters() {
    assert!(market_params(None, Some("   ")).is_empty());
    assert_eq!(market_params(Some("onion"), None), vec![("commodity", "ONION".to_owned())]);
}

#[test]
fn bearer_prefixes_token() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message(502), "request failed: 502");
}

#[test]
fn error_detail_reads_backend_body() {
    assert_eq!(error_detail(r#"{"detail":"Email already registered"}"#), Some("Email already registered".to_owned()));
}

#[test]
fn error_detail_ignores_foreign_or_blank_bodies() {
    assert_eq!(error_detail("<html>Bad gateway</html>"), None);
    assert_eq!(error_detail(r#"{"detail":"  "}"#), None);
    assert_eq!(error_detail(""), None);
}

#[test]
fn server_stubs_report_unavailable() {
    let result = futures::executor::block_on(send_chat("hello", Language::En));
    assert_eq!(result, Err("not available on server".to_owned()));
    assert_eq!(futures::executor::block_on(fetch_me("tok")), TokenCheck::Unavailable);
}

#[test]
fn only_unauthorized_rejects_token() {
    assert!(token_rejected(401));
    for status in [403, 404, 429, 500, 502, 503] {
        assert!(!token_rejected(status), "status {status} should keep the token");
    }
}
