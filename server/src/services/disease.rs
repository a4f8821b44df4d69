//! Disease service: classify a leaf photo with a multimodal LLM.
//!
//! DESIGN
//! ======
//! The model is constrained to the shared label catalogue and asked for a
//! single JSON object `{label, confidence, summary}`. Parsing is lenient:
//! code fences and surrounding prose are tolerated, off-catalogue labels
//! collapse to `unknown`, and an unparseable answer still reaches the farmer
//! as free text under the `unknown` label.

use std::sync::{Arc, OnceLock};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::{info, warn};
use wire::{DISEASE_LABELS, PredictResponse, UNKNOWN_LABEL, normalize_label};

use crate::llm::LlmChat;
use crate::llm::types::{ImageSource, LlmError, Message};

const DEFAULT_DISEASE_MAX_TOKENS: u32 = 1024;

fn disease_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| {
        std::env::var("DISEASE_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DISEASE_MAX_TOKENS)
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DiseaseError {
    #[error("not an image")]
    NotAnImage,
    #[error("empty upload")]
    EmptyUpload,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

#[must_use]
pub fn build_system_prompt() -> String {
    let labels = DISEASE_LABELS.join(", ");
    format!(
        "You are a plant pathologist helping Indian farmers. Identify the plant disease in the photo.\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"label\": <one of: {labels}, {UNKNOWN_LABEL}>, \"confidence\": <number 0..1>, \
         \"summary\": <lines starting with Symptoms:, Organic:, Chemical:, Prevention:>}}\n\
         Use \"{UNKNOWN_LABEL}\" when the photo is not a plant or the disease is not in the list."
    )
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct Verdict {
    label: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    summary: Option<String>,
}

/// Slice out the outermost `{...}` of a model answer, ignoring fences and prose.
fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Turn a raw model answer into the wire prediction.
#[must_use]
pub fn parse_prediction(raw: &str) -> PredictResponse {
    let verdict = json_object_span(raw).and_then(|span| serde_json::from_str::<Verdict>(span).ok());
    let Some(verdict) = verdict else {
        return PredictResponse { label: UNKNOWN_LABEL.to_owned(), confidence: None, result: raw.trim().to_owned() };
    };

    let label = normalize_label(&verdict.label);
    let label = if DISEASE_LABELS.contains(&label.as_str()) { label } else { UNKNOWN_LABEL.to_owned() };
    let confidence = verdict
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0));

    PredictResponse { label, confidence, result: verdict.summary.unwrap_or_default().trim().to_owned() }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Classify an uploaded image.
///
/// # Errors
///
/// Returns [`DiseaseError::NotAnImage`] / [`DiseaseError::EmptyUpload`] before
/// calling the model, and [`DiseaseError::Llm`] when the provider fails.
pub async fn predict(llm: &Arc<dyn LlmChat>, content_type: &str, bytes: &[u8]) -> Result<PredictResponse, DiseaseError> {
    if !is_image_content_type(content_type) {
        return Err(DiseaseError::NotAnImage);
    }
    if bytes.is_empty() {
        return Err(DiseaseError::EmptyUpload);
    }

    let image = ImageSource::base64(content_type.trim().to_ascii_lowercase(), BASE64.encode(bytes));
    let messages = [Message::user_image(image, "Identify the plant disease and suggest remedy.")];
    let response = llm
        .chat(disease_max_tokens(), &build_system_prompt(), &messages)
        .await?;

    let prediction = parse_prediction(&response.text());
    if prediction.label == UNKNOWN_LABEL {
        warn!(bytes = bytes.len(), "disease: model gave no catalogue label");
    } else {
        info!(label = %prediction.label, confidence = ?prediction.confidence, "disease: prediction");
    }
    Ok(prediction)
}

#[cfg(test)]
#[path = "disease_test.rs"]
mod tests;
