//! Assistant route: `POST /assistant/chat`.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use wire::{ChatReply, ChatRequest};

use super::{check_rate_limit, error_response};
use crate::services::assistant::{self, AssistantError};
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Empty message");
    }
    let Some(llm) = state.llm.clone() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Assistant not configured");
    };
    if let Err(resp) = check_rate_limit(&state, peer.ip()) {
        return resp;
    }

    match assistant::reply(&llm, &body.message, body.language).await {
        Ok(reply) => Json(ChatReply { reply }).into_response(),
        Err(AssistantError::EmptyMessage) => error_response(StatusCode::BAD_REQUEST, "Empty message"),
        Err(AssistantError::Llm(e)) => {
            tracing::error!(error = %e, "assistant LLM call failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Assistant service failed.")
        }
    }
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
