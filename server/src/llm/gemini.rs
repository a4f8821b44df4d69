//! Google Gemini `generateContent` client.
//!
//! Roles map `assistant` -> `model`; the system prompt travels as
//! `systemInstruction`. Images go inline as `inlineData` parts.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, Content, ContentBlock, LlmError, Message};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if reqwest cannot build a client.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-200 status or an
    /// unparseable body.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let contents = build_contents(messages);
        let system_instruction = (!system.trim().is_empty()).then(|| GContent { role: None, parts: vec![GPart::text(system)] });
        let body = GRequest {
            system_instruction,
            contents: &contents,
            generation_config: GGenerationConfig { max_output_tokens: max_tokens },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_generate_content_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GContent>,
    contents: &'a [GContent],
    generation_config: GGenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct GContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GPart {
    Text { text: String },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: GInlineData,
    },
}

impl GPart {
    fn text(text: &str) -> Self {
        Self::Text { text: text.to_string() }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GInlineData {
    mime_type: String,
    data: String,
}

fn gemini_role(role: &str) -> &'static str {
    if role == "assistant" { "model" } else { "user" }
}

fn build_contents(messages: &[Message]) -> Vec<GContent> {
    let mut out = Vec::new();
    for message in messages {
        let parts = match &message.content {
            Content::Text(text) => vec![GPart::text(text)],
            Content::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(GPart::text(text)),
                    ContentBlock::Image { source } => Some(GPart::Inline {
                        inline_data: GInlineData { mime_type: source.media_type.clone(), data: source.data.clone() },
                    }),
                    ContentBlock::Thinking { .. } | ContentBlock::Unknown => None,
                })
                .collect(),
        };
        if !parts.is_empty() {
            out.push(GContent { role: Some(gemini_role(&message.role)), parts });
        }
    }
    out
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_generate_content_response(json_text: &str, requested_model: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("modelVersion")
        .and_then(Value::as_str)
        .unwrap_or(requested_model)
        .to_owned();
    let usage = root.get("usageMetadata");
    let input_tokens = usage
        .and_then(|u| u.get("promptTokenCount"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let output_tokens = usage
        .and_then(|u| u.get("candidatesTokenCount"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("generate_content: missing candidates[0]".to_string()));
    };

    let mut content = Vec::new();
    if let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
    {
        for part in parts {
            // Thought summaries are flagged with `thought: true`.
            if part.get("thought").and_then(Value::as_bool) == Some(true) {
                continue;
            }
            if let Some(text) = part.get("text").and_then(Value::as_str)
                && !text.is_empty()
            {
                content.push(ContentBlock::Text { text: text.to_string() });
            }
        }
    }

    let stop_reason = match candidate.get("finishReason").and_then(Value::as_str) {
        Some("MAX_TOKENS") => "max_tokens",
        _ => "end_turn",
    };

    Ok(ChatResponse { content, model, stop_reason: stop_reason.to_string(), input_tokens, output_tokens })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
