use std::sync::Mutex;

use super::*;
use crate::llm::types::{ChatResponse, Content, ContentBlock};

// =========================================================================
// MockLlm
// =========================================================================

struct MockLlm {
    reply: Result<String, u16>,
    seen: Mutex<Vec<(String, Vec<Message>)>>,
}

impl MockLlm {
    fn replying(text: &str) -> Self {
        Self { reply: Ok(text.into()), seen: Mutex::new(Vec::new()) }
    }

    fn failing(status: u16) -> Self {
        Self { reply: Err(status), seen: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, _max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.seen
            .lock()
            .unwrap()
            .push((system.to_owned(), messages.to_vec()));
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: vec![ContentBlock::Text { text: text.clone() }],
                model: "mock".into(),
                stop_reason: "end_turn".into(),
                input_tokens: 3,
                output_tokens: 2,
            }),
            Err(status) => Err(LlmError::ApiResponse { status: *status, body: "boom".into() }),
        }
    }
}

// =========================================================================
// build_system_prompt
// =========================================================================

#[test]
fn system_prompt_names_persona_and_language() {
    let prompt = build_system_prompt(Language::Kn);
    assert!(prompt.contains("AgriMithra"));
    assert!(prompt.contains("Reply in Kannada"));
}

// =========================================================================
// reply
// =========================================================================

#[tokio::test]
async fn reply_returns_trimmed_model_text() {
    let mock = Arc::new(MockLlm::replying("  Sow after the first rains.  "));
    let llm: Arc<dyn LlmChat> = mock.clone();
    let text = reply(&llm, "When to sow ragi?", Language::En).await.unwrap();
    assert_eq!(text, "Sow after the first rains.");

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.contains("Reply in English"));
    assert!(matches!(&seen[0].1[0].content, Content::Text(t) if t == "Question: When to sow ragi?"));
}

#[tokio::test]
async fn blank_message_is_rejected_before_calling_model() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let llm: Arc<dyn LlmChat> = mock.clone();
    let err = reply(&llm, "   ", Language::En).await.unwrap_err();
    assert!(matches!(err, AssistantError::EmptyMessage));
    assert!(mock.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_model_output_becomes_apology() {
    let llm: Arc<dyn LlmChat> = Arc::new(MockLlm::replying("   "));
    let text = reply(&llm, "hello", Language::Kn).await.unwrap();
    assert_eq!(text, EMPTY_REPLY);
}

#[tokio::test]
async fn provider_failure_propagates() {
    let llm: Arc<dyn LlmChat> = Arc::new(MockLlm::failing(500));
    let err = reply(&llm, "hello", Language::En).await.unwrap_err();
    assert!(matches!(err, AssistantError::Llm(LlmError::ApiResponse { status: 500, .. })));
}
