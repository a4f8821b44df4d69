//! Upstream proxy client: OpenWeather, data.gov.in and the news feeds.
//!
//! DESIGN
//! ======
//! The browser never sees third-party credentials. Routes hand validated
//! query values to the URL builders here, which attach the configured key,
//! and the JSON body comes back unchanged. Each upstream is optional: a
//! missing key disables only that proxy.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_MARKET_BASE_URL: &str = "https://api.data.gov.in/resource";
const DEFAULT_MARKET_RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 20;
const MARKET_PAGE_LIMIT: &str = "500";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0} upstream not configured")]
    NotConfigured(&'static str),
    #[error("invalid upstream URL: {0}")]
    Url(String),
    #[error("upstream request failed: {0}")]
    Request(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream body is not JSON: {0}")]
    Parse(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// The three coordinate-keyed OpenWeather resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherResource {
    Current,
    Forecast,
    Air,
}

impl WeatherResource {
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "current" => Some(Self::Current),
            "forecast" => Some(Self::Forecast),
            "air" => Some(Self::Air),
            _ => None,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Current => "/data/2.5/weather",
            Self::Forecast => "/data/2.5/forecast",
            Self::Air => "/data/2.5/air_pollution",
        }
    }

    fn metric(self) -> bool {
        !matches!(self, Self::Air)
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub market_api_key: Option<String>,
    pub market_resource_id: String,
    pub market_base_url: String,
    pub news_url: Option<String>,
    pub schemes_url: Option<String>,
    pub timeout_secs: u64,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl UpstreamConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openweather_api_key: env_nonempty("OPENWEATHER_API_KEY"),
            openweather_base_url: env_nonempty("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            market_api_key: env_nonempty("MARKET_API_KEY"),
            market_resource_id: env_nonempty("MARKET_RESOURCE_ID").unwrap_or_else(|| DEFAULT_MARKET_RESOURCE_ID.to_owned()),
            market_base_url: env_nonempty("MARKET_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MARKET_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            news_url: env_nonempty("NEWS_API_URL"),
            schemes_url: env_nonempty("SCHEMES_API_URL"),
            timeout_secs: env_nonempty("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }

    /// `GET {base}/geo/1.0/direct?q=..&limit=1&appid=..`
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] without an OpenWeather key.
    pub fn geocode_url(&self, city: &str) -> Result<Url, UpstreamError> {
        let key = self
            .openweather_api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("weather"))?;
        parse_url(
            &format!("{}/geo/1.0/direct", self.openweather_base_url),
            &[("q", city), ("limit", "1"), ("appid", key)],
        )
    }

    /// Coordinate-keyed weather resource; current and forecast use metric units.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] without an OpenWeather key.
    pub fn weather_url(&self, resource: WeatherResource, lat: f64, lon: f64) -> Result<Url, UpstreamError> {
        let key = self
            .openweather_api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("weather"))?;
        let lat = lat.to_string();
        let lon = lon.to_string();
        let mut params = vec![("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", key)];
        if resource.metric() {
            params.push(("units", "metric"));
        }
        parse_url(&format!("{}{}", self.openweather_base_url, resource.path()), &params)
    }

    /// data.gov.in commodity feed, optionally filtered by commodity and state.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] without a market key.
    pub fn market_url(&self, commodity: Option<&str>, state: Option<&str>) -> Result<Url, UpstreamError> {
        let key = self
            .market_api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("market"))?;
        let mut params = vec![("api-key", key), ("format", "json"), ("limit", MARKET_PAGE_LIMIT)];
        if let Some(commodity) = commodity {
            params.push(("filters[commodity]", commodity));
        }
        if let Some(state) = state {
            params.push(("filters[state]", state));
        }
        parse_url(&format!("{}/{}", self.market_base_url, self.market_resource_id), &params)
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] when `NEWS_API_URL` is unset.
    pub fn news_url(&self) -> Result<Url, UpstreamError> {
        let raw = self
            .news_url
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("news"))?;
        Url::parse(raw).map_err(|e| UpstreamError::Url(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::NotConfigured`] when `SCHEMES_API_URL` is unset.
    pub fn schemes_url(&self) -> Result<Url, UpstreamError> {
        let raw = self
            .schemes_url
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("schemes"))?;
        Url::parse(raw).map_err(|e| UpstreamError::Url(e.to_string()))
    }
}

fn parse_url(base: &str, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
    Url::parse_with_params(base, params).map_err(|e| UpstreamError::Url(e.to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: Arc<UpstreamConfig>,
}

impl UpstreamClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::HttpClientBuild`] if reqwest cannot build a client.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("agrimithra/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config: Arc::new(config) })
    }

    #[must_use]
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// GET a URL and return its JSON body unchanged.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure, non-2xx status or a
    /// non-JSON body.
    pub async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Parse(e.without_url().to_string()))
    }
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
