//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error/`Unavailable` since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result<_, String>` outputs instead of panics. The
//! string is either the backend's `{"detail"}` text or a short transport
//! message; widgets decide how to phrase it for the farmer.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    AirQuality, ChatReply, Coords, CurrentWeather, Feed, Forecast, GeoHit, Language, MarketFeed, TokenResponse,
    UserResponse,
};
#[cfg(feature = "hydrate")]
use super::types::{ChatRequest, PredictResponse};

/// Generic sign-in failure shown when the backend gives no detail.
pub const AUTH_FAILED_MESSAGE: &str = "Failed. Try again!";

#[cfg(any(test, feature = "hydrate"))]
fn weather_endpoint(resource: &str) -> String {
    format!("/api/weather/{resource}")
}

#[cfg(any(test, feature = "hydrate"))]
fn coord_params(coords: Coords) -> [(&'static str, String); 2] {
    [("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

/// Query pairs for `/api/market`. Blank filters are omitted; present ones
/// are trimmed and uppercased to match the provider's casing.
#[cfg(any(test, feature = "hydrate"))]
fn market_params(commodity: Option<&str>, state: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    for (key, value) in [("commodity", commodity), ("state", state)] {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            params.push((key, v.to_uppercase()));
        }
    }
    params
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Outcome of checking a stored token against `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenCheck {
    Valid(UserResponse),
    /// The backend refused the token; it should be forgotten.
    Rejected,
    /// Network failure or server error; the token may still be good.
    Unavailable,
}

/// Only a 401 means the token itself is bad.
#[cfg(any(test, feature = "hydrate"))]
fn token_rejected(status: u16) -> bool {
    status == 401
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pull `detail` out of an error body, if the body is one of ours.
#[cfg(any(test, feature = "hydrate"))]
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<wire::ErrorBody>(body)
        .ok()
        .map(|b| b.detail.trim().to_owned())
        .filter(|d| !d.is_empty())
}

#[cfg(feature = "hydrate")]
async fn failure(resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error_detail(&body).unwrap_or_else(|| request_failed_message(status))
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(req: gloo_net::http::RequestBuilder) -> Result<T, String> {
    let resp = req.send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(failure(resp).await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

// =============================================================================
// WEATHER
// =============================================================================

/// Resolve a city name via `GET /api/weather/geocode?q=`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn geocode(city: &str) -> Result<Vec<GeoHit>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get("/api/weather/geocode").query([("q", city)])).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = city;
        Err("not available on server".to_owned())
    }
}

/// Fetch `GET /api/weather/current`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_current(coords: Coords) -> Result<CurrentWeather, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get(&weather_endpoint("current")).query(coord_params(coords))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = coords;
        Err("not available on server".to_owned())
    }
}

/// Fetch `GET /api/weather/forecast`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_forecast(coords: Coords) -> Result<Forecast, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get(&weather_endpoint("forecast")).query(coord_params(coords))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = coords;
        Err("not available on server".to_owned())
    }
}

/// Fetch `GET /api/weather/air`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_air_quality(coords: Coords) -> Result<AirQuality, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get(&weather_endpoint("air")).query(coord_params(coords))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = coords;
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// MARKET / FEEDS
// =============================================================================

/// Fetch commodity prices, optionally filtered server-side.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_market(commodity: Option<&str>, state: Option<&str>) -> Result<MarketFeed, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get("/api/market").query(market_params(commodity, state))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (commodity, state);
        Err("not available on server".to_owned())
    }
}

/// Fetch the agriculture news feed.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_news() -> Result<Feed, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get("/api/news")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch the government schemes feed.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_schemes() -> Result<Feed, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(gloo_net::http::Request::get("/api/schemes")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// DISEASE / ASSISTANT
// =============================================================================

/// Upload an image to `POST /disease/predict` as multipart field `file`.
///
/// # Errors
///
/// Returns an error string if the form cannot be built, the request fails,
/// or the body is malformed.
#[cfg(feature = "hydrate")]
pub async fn predict_disease(file: &web_sys::File) -> Result<PredictResponse, String> {
    let form = web_sys::FormData::new().map_err(|_| "could not build upload form".to_owned())?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| "could not attach image".to_owned())?;
    let req = gloo_net::http::Request::post("/disease/predict")
        .body(form)
        .map_err(|e| e.to_string())?;
    let resp = req.send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(failure(resp).await);
    }
    resp.json::<PredictResponse>().await.map_err(|e| e.to_string())
}

/// Ask the assistant via `POST /assistant/chat`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn send_chat(message: &str, language: Language) -> Result<ChatReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = ChatRequest { message: message.to_owned(), language };
        let req = gloo_net::http::Request::post("/assistant/chat")
            .json(&payload)
            .map_err(|e| e.to_string())?;
        let resp = req.send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(failure(resp).await);
        }
        resp.json::<ChatReply>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (message, language);
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[cfg(feature = "hydrate")]
async fn post_auth<T: serde::de::DeserializeOwned>(path: &str, payload: &impl serde::Serialize) -> Result<T, String> {
    let req = gloo_net::http::Request::post(path)
        .json(payload)
        .map_err(|_| AUTH_FAILED_MESSAGE.to_owned())?;
    let resp = req.send().await.map_err(|_| AUTH_FAILED_MESSAGE.to_owned())?;
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(error_detail(&body).unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_owned()));
    }
    resp.json::<T>().await.map_err(|_| AUTH_FAILED_MESSAGE.to_owned())
}

/// Sign in via `POST /auth/login`.
///
/// # Errors
///
/// Returns the backend's `detail` text, or [`AUTH_FAILED_MESSAGE`].
pub async fn login(email: &str, password: &str) -> Result<TokenResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = wire::LoginRequest { email: email.to_owned(), password: password.to_owned() };
        post_auth("/auth/login", &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Register via `POST /auth/signup`.
///
/// # Errors
///
/// Returns the backend's `detail` text, or [`AUTH_FAILED_MESSAGE`].
pub async fn signup(name: &str, email: &str, password: &str) -> Result<UserResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload =
            wire::SignupRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() };
        post_auth("/auth/signup", &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err("not available on server".to_owned())
    }
}

/// Resolve a stored token to its account via `GET /auth/me`.
/// Always [`TokenCheck::Unavailable`] on the server.
pub async fn fetch_me(token: &str) -> TokenCheck {
    #[cfg(feature = "hydrate")]
    {
        let Ok(resp) = gloo_net::http::Request::get("/auth/me")
            .header("Authorization", &bearer(token))
            .send()
            .await
        else {
            return TokenCheck::Unavailable;
        };
        if token_rejected(resp.status()) {
            return TokenCheck::Rejected;
        }
        if !resp.ok() {
            return TokenCheck::Unavailable;
        }
        resp.json::<UserResponse>().await.map_or(TokenCheck::Unavailable, TokenCheck::Valid)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        TokenCheck::Unavailable
    }
}

/// End the server session via `POST /auth/logout`. Best effort.
pub async fn logout(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/auth/logout")
            .header("Authorization", &bearer(token))
            .send()
            .await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}
