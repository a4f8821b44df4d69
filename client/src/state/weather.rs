//! Weather widget state and forecast derivations.
//!
//! DESIGN
//! ======
//! A lookup fetches current conditions, the 3-hourly forecast and air
//! quality in that order and replaces the whole [`WeatherSnapshot`] at once;
//! the first failure aborts the rest. Calendar-day grouping uses the
//! searched location's UTC offset (`city.timezone`), not the browser's, so
//! a farmer checking another region sees that region's days.
//!
//! The fetches go through [`WeatherSource`] so the flow can be driven
//! against fakes in tests.

#[cfg(test)]
#[path = "weather_test.rs"]
mod weather_test;

use std::collections::BTreeMap;

use time::Date;

use super::request::{RequestSeq, Ticket};
use crate::net::types::{AirQuality, Coords, CurrentWeather, Forecast, ForecastSample, GeoHit};
use crate::util::datetime;

/// Days shown in the daily forecast strip.
pub const DAILY_LIMIT: usize = 5;
/// Samples shown in today's hourly strip.
pub const HOURLY_LIMIT: usize = 6;

/// Failures surfaced by the weather widget. `Display` is the farmer-facing text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    #[error("Error searching city: City not found")]
    CityNotFound,
    #[error("Error searching city: {0}")]
    Geocode(String),
    #[error("Error fetching weather data: {0}")]
    Fetch(String),
    #[error("Unable to get location: {0}")]
    Location(String),
    #[error("Geolocation is not supported by your browser")]
    GeolocationUnsupported,
}

/// Everything one successful lookup produced.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub forecast: Forecast,
    pub air_quality: AirQuality,
    pub daily: Vec<ForecastSample>,
    pub hourly: Vec<ForecastSample>,
}

impl WeatherSnapshot {
    /// Location UTC offset used for every displayed time.
    #[must_use]
    pub fn offset_secs(&self) -> i64 {
        location_offset(&self.current, &self.forecast)
    }
}

/// The searched location's UTC offset: the forecast city's, or the current
/// report's when the forecast leaves it at zero.
#[must_use]
pub fn location_offset(current: &CurrentWeather, forecast: &Forecast) -> i64 {
    if forecast.city.timezone == 0 { current.timezone } else { forecast.city.timezone }
}

/// Weather widget state.
#[derive(Clone, Debug, Default)]
pub struct WeatherState {
    /// Contents of the city input.
    pub city: String,
    pub snapshot: Option<WeatherSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub seq: RequestSeq,
}

impl WeatherState {
    /// Start a city search. Returns `None` (and changes nothing) for a blank city.
    pub fn begin_search(&mut self) -> Option<(Ticket, String)> {
        let city = self.city.trim().to_owned();
        if city.is_empty() {
            return None;
        }
        Some((self.begin(), city))
    }

    /// Start a lookup by device location.
    pub fn begin_locate(&mut self) -> Ticket {
        self.begin()
    }

    fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.seq.issue()
    }

    /// Apply a lookup result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<WeatherSnapshot, WeatherError>) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(snapshot) => {
                if !snapshot.current.name.is_empty() {
                    self.city.clone_from(&snapshot.current.name);
                }
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }
}

// =============================================================================
// SOURCE
// =============================================================================

/// Remote weather calls. Errors are short transport messages.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    async fn geocode(&self, city: &str) -> Result<Vec<GeoHit>, String>;
    async fn current(&self, coords: Coords) -> Result<CurrentWeather, String>;
    async fn forecast(&self, coords: Coords) -> Result<Forecast, String>;
    async fn air_quality(&self, coords: Coords) -> Result<AirQuality, String>;
}

/// [`WeatherSource`] backed by the server proxy.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpWeather;

impl WeatherSource for HttpWeather {
    async fn geocode(&self, city: &str) -> Result<Vec<GeoHit>, String> {
        crate::net::api::geocode(city).await
    }

    async fn current(&self, coords: Coords) -> Result<CurrentWeather, String> {
        crate::net::api::fetch_current(coords).await
    }

    async fn forecast(&self, coords: Coords) -> Result<Forecast, String> {
        crate::net::api::fetch_forecast(coords).await
    }

    async fn air_quality(&self, coords: Coords) -> Result<AirQuality, String> {
        crate::net::api::fetch_air_quality(coords).await
    }
}

/// Fetch and derive everything for a coordinate pair.
///
/// # Errors
///
/// [`WeatherError::Fetch`] on the first failed call; later calls are skipped.
pub async fn load_coords<S: WeatherSource>(
    source: &S,
    coords: Coords,
    now_unix: i64,
) -> Result<WeatherSnapshot, WeatherError> {
    let current = source.current(coords).await.map_err(WeatherError::Fetch)?;
    let forecast = source.forecast(coords).await.map_err(WeatherError::Fetch)?;
    let air_quality = source.air_quality(coords).await.map_err(WeatherError::Fetch)?;
    let offset = location_offset(&current, &forecast);
    let daily = daily_forecast(&forecast, offset);
    let hourly = hourly_today(&forecast, now_unix, offset);
    Ok(WeatherSnapshot { current, forecast, air_quality, daily, hourly })
}

/// Geocode a city (first hit) then [`load_coords`].
///
/// # Errors
///
/// [`WeatherError::CityNotFound`] with no hits, [`WeatherError::Geocode`] if
/// the lookup fails, otherwise whatever [`load_coords`] returns.
pub async fn load_city<S: WeatherSource>(source: &S, city: &str, now_unix: i64) -> Result<WeatherSnapshot, WeatherError> {
    let hits = source.geocode(city).await.map_err(WeatherError::Geocode)?;
    let hit = hits.first().ok_or(WeatherError::CityNotFound)?;
    load_coords(source, hit.coords(), now_unix).await
}

// =============================================================================
// DERIVATIONS
// =============================================================================

/// One sample per local calendar day, the one closest to local noon, in
/// ascending date order and at most [`DAILY_LIMIT`] days. Ties keep the
/// earlier sample. `offset` is the location's UTC offset in seconds.
#[must_use]
pub fn daily_forecast(forecast: &Forecast, offset: i64) -> Vec<ForecastSample> {
    let mut best: BTreeMap<Date, (i64, &ForecastSample)> = BTreeMap::new();
    for sample in &forecast.list {
        let (Some(date), Some(distance)) =
            (datetime::local_date(sample.dt, offset), datetime::seconds_from_noon(sample.dt, offset))
        else {
            continue;
        };
        match best.get(&date) {
            Some((kept, _)) if *kept <= distance => {}
            _ => {
                best.insert(date, (distance, sample));
            }
        }
    }
    best.into_values()
        .take(DAILY_LIMIT)
        .map(|(_, sample)| sample.clone())
        .collect()
}

/// The first [`HOURLY_LIMIT`] samples falling on the location's current day.
#[must_use]
pub fn hourly_today(forecast: &Forecast, now_unix: i64, offset: i64) -> Vec<ForecastSample> {
    let Some(today) = datetime::local_date(now_unix, offset) else {
        return Vec::new();
    };
    forecast
        .list
        .iter()
        .filter(|s| datetime::local_date(s.dt, offset) == Some(today))
        .take(HOURLY_LIMIT)
        .cloned()
        .collect()
}

/// OpenWeather AQI index (1..=5) as a word.
#[must_use]
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

#[must_use]
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@2x.png")
}

#[allow(clippy::cast_possible_truncation)]
fn rounded(value: f64) -> i64 {
    value.round() as i64
}

/// `27°C`
#[must_use]
pub fn celsius(temp: f64) -> String {
    format!("{}°C", rounded(temp))
}

/// Metres as kilometres with one decimal, e.g. `6.0 km`.
#[must_use]
pub fn visibility_km(metres: f64) -> String {
    format!("{:.1} km", metres / 1000.0)
}

/// Pollutant reading rounded to a whole number.
#[must_use]
pub fn pollutant(value: f64) -> String {
    rounded(value).to_string()
}
