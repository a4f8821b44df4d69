//! Browser `localStorage` helpers for the session token and preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token from `/auth/login` is stored raw under `token`. The
//! assistant language is stored as JSON. Off-browser every read is `None`
//! and every write is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wire::Language;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the assistant language as JSON (`"en"`, `"kn"`).
pub const LANGUAGE_KEY: &str = "agrimithra_lang";

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// The stored bearer token, if any.
pub fn load_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub fn save_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(s) = storage() {
            let _ = s.set_item(TOKEN_KEY, token);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(s) = storage() {
            let _ = s.remove_item(TOKEN_KEY);
        }
    }
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(s) = storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = s.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Remembered assistant language, defaulting to English.
pub fn load_language() -> Language {
    load_json(LANGUAGE_KEY).unwrap_or_default()
}

pub fn save_language(language: Language) {
    save_json(LANGUAGE_KEY, &language);
}
