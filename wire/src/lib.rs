//! Shared request/response schema for the AgriMithra client and server.
//!
//! This crate owns the JSON shapes exchanged between the Leptos `client` and
//! the Axum `server`, plus the disease-label catalogue both sides agree on.
//! Third-party payloads (weather, market, news) are not modelled here; the
//! server proxies them untouched and the client decodes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing wire-level enums from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// The language code is not one the assistant supports.
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
}

// =============================================================================
// LANGUAGE
// =============================================================================

/// Reply language for the assistant and speech APIs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Kn,
}

impl Language {
    /// Short code sent over the wire (`en`, `kn`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Kn => "kn",
        }
    }

    /// BCP 47 tag used for speech synthesis and recognition.
    #[must_use]
    pub fn speech_tag(self) -> &'static str {
        match self {
            Self::En => "en-IN",
            Self::Kn => "kn-IN",
        }
    }

    /// English name of the language, used in LLM prompts.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Kn => "Kannada",
        }
    }
}

impl FromStr for Language {
    type Err = WireError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "kn" => Ok(Self::Kn),
            other => Err(WireError::UnknownLanguage(other.to_owned())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// ASSISTANT
// =============================================================================

/// Body of `POST /assistant/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, alias = "lang")]
    pub language: Language,
}

/// Response of `POST /assistant/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

// =============================================================================
// DISEASE DETECTION
// =============================================================================

/// Response of `POST /disease/predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Normalised label (see [`normalize_label`]); `unknown` when unclassified.
    pub label: String,
    /// Model confidence in `0.0..=1.0`, when the model reported one.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Free-text observations from the model.
    #[serde(default)]
    pub result: String,
}

/// Label used when the model could not classify the image.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Labels the classifier is asked to choose from. The client keeps advice
/// text for each of these.
pub const DISEASE_LABELS: &[&str] = &[
    "healthy",
    "tomato_early_blight",
    "tomato_late_blight",
    "tomato_leaf_curl_virus",
    "potato_early_blight",
    "potato_late_blight",
    "rice_blast",
    "rice_brown_spot",
    "rice_bacterial_leaf_blight",
    "wheat_leaf_rust",
    "maize_common_rust",
    "powdery_mildew",
];

/// Canonical form of a disease label: lowercase ASCII, with runs of spaces,
/// hyphens and underscores collapsed into a single underscore.
///
/// `"Tomato___Late blight"` becomes `"tomato_late_blight"`.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.trim().chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            pending_sep = !out.is_empty();
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response carrying an opaque bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Successful signup response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Error body returned by every backend endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
