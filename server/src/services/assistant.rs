//! Assistant service: one-shot farming Q&A through the configured LLM.
//!
//! Each request is independent: the transcript lives in the browser and the
//! server only sees the latest question.

use std::sync::{Arc, OnceLock};

use tracing::info;
use wire::Language;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

const DEFAULT_ASSISTANT_MAX_TOKENS: u32 = 1024;

/// Substituted when the model answers with nothing but whitespace.
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate an answer.";

fn assistant_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| {
        std::env::var("ASSISTANT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_ASSISTANT_MAX_TOKENS)
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("empty message")]
    EmptyMessage,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

#[must_use]
pub fn build_system_prompt(language: Language) -> String {
    format!(
        "You are AgriMithra, a helpful Indian agricultural assistant. \
         Reply in {}. Keep answers short, clear, and practical for farmers.",
        language.name()
    )
}

/// Ask the model one question and return its trimmed reply.
///
/// # Errors
///
/// Returns [`AssistantError::EmptyMessage`] for a blank question and
/// [`AssistantError::Llm`] when the provider call fails.
pub async fn reply(llm: &Arc<dyn LlmChat>, message: &str, language: Language) -> Result<String, AssistantError> {
    let question = message.trim();
    if question.is_empty() {
        return Err(AssistantError::EmptyMessage);
    }

    let system = build_system_prompt(language);
    let messages = [Message::user_text(format!("Question: {question}"))];
    let response = llm
        .chat(assistant_max_tokens(), &system, &messages)
        .await?;

    info!(
        language = language.code(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "assistant: reply generated"
    );

    let text = response.text();
    Ok(if text.is_empty() { EMPTY_REPLY.to_owned() } else { text })
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
