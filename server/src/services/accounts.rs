//! Account service: email/password signup and login.
//!
//! DESIGN
//! ======
//! Emails are normalized (trimmed, lowercased) before every lookup so the
//! `users.email` unique index is the single source of truth for duplicates.
//! Passwords are stored as Argon2id PHC strings; login failures never reveal
//! whether the email exists.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session;

const SALT_LEN: usize = 16;
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("name and password are required")]
    MissingField,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A stored account, minus its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`AccountError::Hash`] if salt encoding or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt_bytes: [u8; SALT_LEN] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AccountError::Hash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hash(e.to_string()))
}

/// Check a password against a stored PHC string. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// SIGNUP / LOGIN
// =============================================================================

/// Register a new account.
///
/// # Errors
///
/// Returns [`AccountError::EmailTaken`] for a duplicate email, validation
/// errors for blank fields or a malformed email, and database errors.
pub async fn signup(pool: &PgPool, name: &str, email: &str, password: &str) -> Result<Account, AccountError> {
    let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    let name = name.trim();
    if name.is_empty() || password.is_empty() {
        return Err(AccountError::MissingField);
    }

    let existing = sqlx::query("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let password_hash = hash_password(password)?;
    let row = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| if is_unique_violation(&e) { AccountError::EmailTaken } else { AccountError::Db(e) })?;

    Ok(Account { id: row.get("id"), name: name.to_owned(), email })
}

/// Verify credentials and open a session, returning the bearer token.
///
/// # Errors
///
/// Returns [`AccountError::InvalidCredentials`] for an unknown email or wrong
/// password, and database errors.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<String, AccountError> {
    let email = normalize_email(email).ok_or(AccountError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let stored: String = row.get("password_hash");
    if !verify_password(password, &stored) {
        return Err(AccountError::InvalidCredentials);
    }

    if let Err(e) = session::purge_expired_sessions(pool).await {
        tracing::warn!(error = %e, "expired session purge failed");
    }

    let user_id: Uuid = row.get("id");
    Ok(session::create_session(pool, user_id).await?)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(sqlx::error::DatabaseError::code)
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
