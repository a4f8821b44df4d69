//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool (accounts and sessions), the optional LLM
//! client, the upstream proxy client and the rate limiter guarding the
//! LLM-backed endpoints. Everything is cheap to clone.

use std::sync::Arc;

use sqlx::PgPool;

use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::upstream::UpstreamClient;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Credential-injecting client for weather, market and news upstreams.
    pub upstream: UpstreamClient,
    /// In-memory rate limiter for LLM requests.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, llm: Option<Arc<dyn LlmChat>>, upstream: UpstreamClient) -> Self {
        Self { pool, llm, upstream, rate_limiter: RateLimiter::new() }
    }

    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
