#![recursion_limit = "256"]

mod db;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use llm::LlmChat;
use services::upstream::{UpstreamClient, UpstreamConfig};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");
    match services::session::purge_expired_sessions(&pool).await {
        Ok(purged) => tracing::info!(purged, "expired sessions removed"),
        Err(e) => tracing::warn!(error = %e, "expired session purge failed"),
    }

    // LLM is optional: assistant and disease endpoints answer 503 without it.
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; assistant and disease detection disabled");
            None
        }
    };

    let upstream_config = UpstreamConfig::from_env();
    if upstream_config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; weather proxy disabled");
    }
    if upstream_config.market_api_key.is_none() {
        tracing::warn!("MARKET_API_KEY not set; market proxy disabled");
    }
    let upstream = UpstreamClient::new(upstream_config).expect("upstream client init failed");

    let state = state::AppState::new(pool, llm, upstream);

    let app = routes::app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "agrimithra listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
