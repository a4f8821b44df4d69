//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API (auth, assistant, disease, upstream
//! proxies) and stitches it with Leptos SSR rendering under a single Axum
//! router. Leptos owns the page paths; everything else is API.

pub mod assistant;
pub mod auth;
pub mod disease;
pub mod proxy;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use wire::ErrorBody;

use crate::state::AppState;

/// Upload cap for `/disease/predict`.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// `{"detail": ...}` error response with the given status.
pub(crate) fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(detail))).into_response()
}

/// Check the LLM rate limits for a peer, mapping a rejection to 429.
pub(crate) fn check_rate_limit(state: &AppState, peer: std::net::IpAddr) -> Result<(), Response> {
    state.rate_limiter.check_and_record(peer).map_err(|e| {
        tracing::warn!(%peer, error = %e, "rate limited");
        error_response(StatusCode::TOO_MANY_REQUESTS, e.to_string())
    })
}

/// JSON API routes shared by the hydrated client and external callers.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route("/assistant/chat", post(assistant::chat))
        .route(
            "/disease/predict",
            post(disease::predict).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/weather/geocode", get(proxy::geocode))
        .route("/api/weather/{resource}", get(proxy::weather))
        .route("/api/market", get(proxy::market))
        .route("/api/news", get(proxy::news))
        .route("/api/schemes", get(proxy::schemes))
        .route("/api/status", get(status))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// API routes + Leptos SSR pages + static `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "AgriMithra API running" }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
