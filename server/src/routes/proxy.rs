//! Upstream proxy routes: weather, market prices and the home feeds.
//!
//! Bodies pass through unchanged; only the query is validated here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use reqwest::Url;
use serde::Deserialize;

use super::error_response;
use crate::services::upstream::{UpstreamError, WeatherResource};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
pub struct CoordsQuery {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
pub struct MarketQuery {
    commodity: Option<String>,
    state: Option<String>,
}

pub(crate) fn upstream_error_response(err: &UpstreamError) -> Response {
    match err {
        UpstreamError::NotConfigured(name) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, format!("{name} service not configured"))
        }
        UpstreamError::Url(_) | UpstreamError::HttpClientBuild(_) => {
            tracing::error!(error = %err, "upstream misconfigured");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upstream misconfigured")
        }
        UpstreamError::Request(_) | UpstreamError::Status(_) | UpstreamError::Parse(_) => {
            tracing::warn!(error = %err, "upstream failed");
            error_response(StatusCode::BAD_GATEWAY, "Upstream service failed")
        }
    }
}

async fn forward(state: &AppState, url: Result<Url, UpstreamError>) -> Response {
    let result = match url {
        Ok(url) => state.upstream.get_json(url).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => upstream_error_response(&e),
    }
}

fn valid_coords(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `GET /api/weather/geocode?q=<city>`
pub async fn geocode(State(state): State<AppState>, Query(query): Query<GeocodeQuery>) -> Response {
    let city = query.q.trim();
    if city.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing city");
    }
    forward(&state, state.upstream.config().geocode_url(city)).await
}

/// `GET /api/weather/{current|forecast|air}?lat=&lon=`
pub async fn weather(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<CoordsQuery>,
) -> Response {
    let Some(resource) = WeatherResource::from_segment(&resource) else {
        return error_response(StatusCode::NOT_FOUND, "Unknown weather resource");
    };
    if !valid_coords(query.lat, query.lon) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid coordinates");
    }
    forward(&state, state.upstream.config().weather_url(resource, query.lat, query.lon)).await
}

/// `GET /api/market[?commodity=&state=]`
pub async fn market(State(state): State<AppState>, Query(query): Query<MarketQuery>) -> Response {
    let url = state.upstream.config().market_url(
        non_blank(query.commodity.as_deref()),
        non_blank(query.state.as_deref()),
    );
    forward(&state, url).await
}

/// `GET /api/news`
pub async fn news(State(state): State<AppState>) -> Response {
    forward(&state, state.upstream.config().news_url()).await
}

/// `GET /api/schemes`
pub async fn schemes(State(state): State<AppState>) -> Response {
    forward(&state, state.upstream.config().schemes_url()).await
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
