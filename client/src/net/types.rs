//! Third-party payload shapes decoded by the client.
//!
//! DESIGN
//! ======
//! The server proxies OpenWeather, data.gov.in and the news feeds without
//! reshaping them, so these types mirror the upstream JSON. Every field the
//! widgets do not strictly need is `#[serde(default)]` so a sparse upstream
//! response still decodes. Backend DTOs live in the `wire` crate.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub use wire::{ChatReply, ChatRequest, ErrorBody, Language, PredictResponse, TokenResponse, UserResponse};

// =============================================================================
// WEATHER
// =============================================================================

/// Latitude/longitude pair used to key the weather calls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

/// One hit from the direct geocoding endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoHit {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeoHit {
    #[must_use]
    pub fn coords(&self) -> Coords {
        Coords { lat: self.lat, lon: self.lon }
    }
}

/// Weather condition entry (`weather[0]` in every payload).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Provider icon code such as `10d`.
    #[serde(default)]
    pub icon: String,
}

/// Temperature, pressure and humidity block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

/// Sunrise and sunset, UTC seconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// `GET /data/2.5/weather` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: Readings,
    /// Visibility in metres.
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub sys: Sun,
    /// Offset from UTC in seconds for the searched location.
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub dt: i64,
}

impl CurrentWeather {
    /// First reported condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// One 3-hourly forecast sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Sample time, UTC seconds.
    pub dt: i64,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastSample {
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// `GET /data/2.5/forecast` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
    #[serde(default)]
    pub city: ForecastCity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirIndex {
    pub aqi: u8,
}

/// Pollutant concentrations in μg/m³.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirComponents {
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub co: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirSample {
    pub main: AirIndex,
    #[serde(default)]
    pub components: AirComponents,
}

/// `GET /data/2.5/air_pollution` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(default)]
    pub list: Vec<AirSample>,
}

impl AirQuality {
    /// The current reading (first sample).
    #[must_use]
    pub fn current(&self) -> Option<&AirSample> {
        self.list.first()
    }
}

// =============================================================================
// MARKET
// =============================================================================

/// One commodity-price row from the data.gov.in feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub variety: Option<String>,
    /// Arrival date as sent by the provider (`DD/MM/YYYY` or `YYYY-MM-DD`).
    #[serde(default)]
    pub arrival_date: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub max_price: Option<String>,
    /// Rupees per quintal.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub modal_price: Option<String>,
}

/// Envelope of the market feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFeed {
    #[serde(default)]
    pub records: Vec<MarketRecord>,
}

/// Prices arrive as strings from data.gov.in but as numbers from some mirrors.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_owned()))
        }
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected price string or number, got {other}"))),
    }
}

// =============================================================================
// NEWS / SCHEMES
// =============================================================================

/// A news or scheme article. Scheme feeds use `name`/`link` instead of
/// `title`/`url`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "link")]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub image_url: Option<String>,
}

/// Envelope of the news and scheme feeds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub articles: Vec<Article>,
}
