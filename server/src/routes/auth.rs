//! Auth routes: email/password signup, login, bearer sessions.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Json, Response};
use wire::{LoginRequest, SignupRequest, TokenResponse, UserResponse};

use super::error_response;
use crate::services::accounts::{self, AccountError};
use crate::services::session;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from `Authorization: Bearer <token>`.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(session::bearer_token)
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not authenticated"))?
            .to_owned();

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, &token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Session lookup failed")
            })?
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not authenticated"))?;

        Ok(Self { user, token })
    }
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn account_error_response(err: &AccountError) -> Response {
    match err {
        AccountError::EmailTaken => error_response(StatusCode::BAD_REQUEST, "Email already registered"),
        AccountError::InvalidEmail => error_response(StatusCode::BAD_REQUEST, "Invalid email"),
        AccountError::MissingField => error_response(StatusCode::BAD_REQUEST, "Name and password are required"),
        AccountError::InvalidCredentials => error_response(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        AccountError::Hash(_) | AccountError::Db(_) => {
            tracing::error!(error = %err, "account operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Account service failed")
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /auth/signup`: create an account.
pub async fn signup(State(state): State<AppState>, Json(body): Json<SignupRequest>) -> Response {
    match accounts::signup(&state.pool, &body.name, &body.email, &body.password).await {
        Ok(account) => {
            tracing::info!(user_id = %account.id, "account created");
            Json(UserResponse { id: account.id.to_string(), name: account.name, email: account.email }).into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// `POST /auth/login`: verify credentials and issue a bearer token.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    match accounts::login(&state.pool, &body.email, &body.password).await {
        Ok(access_token) => Json(TokenResponse { access_token, token_type: "bearer".into() }).into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// `GET /auth/me`: return the current user.
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse { id: auth.user.id.to_string(), name: auth.user.name, email: auth.user.email })
}

/// `POST /auth/logout`: delete the bearer session.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, "session delete failed");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
