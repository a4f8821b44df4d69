use super::*;
use crate::llm::types::ImageSource;

// ===== request building =====

#[test]
fn assistant_role_maps_to_model() {
    let messages = vec![
        Message::user_text("hi"),
        Message { role: "assistant".into(), content: Content::Text("hello".into()) },
    ];
    let json = serde_json::to_value(build_contents(&messages)).unwrap();
    assert_eq!(json[0]["role"], "user");
    assert_eq!(json[1]["role"], "model");
    assert_eq!(json[1]["parts"][0]["text"], "hello");
}

#[test]
fn image_blocks_become_inline_data() {
    let messages = vec![Message::user_image(ImageSource::base64("image/jpeg", "Zm9v"), "Identify")];
    let json = serde_json::to_value(build_contents(&messages)).unwrap();
    assert_eq!(
        json[0]["parts"],
        serde_json::json!([
            { "inlineData": { "mimeType": "image/jpeg", "data": "Zm9v" } },
            { "text": "Identify" }
        ])
    );
}

#[test]
fn request_uses_camel_case_and_system_instruction() {
    let contents = build_contents(&[Message::user_text("q")]);
    let body = GRequest {
        system_instruction: Some(GContent { role: None, parts: vec![GPart::text("sys")] }),
        contents: &contents,
        generation_config: GGenerationConfig { max_output_tokens: 300 },
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["systemInstruction"], serde_json::json!({ "parts": [{ "text": "sys" }] }));
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 300);
}

// ===== response parsing =====

#[test]
fn parse_text_candidate() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "Use neem oil." }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 },
        "modelVersion": "gemini-2.5-flash-001"
    })
    .to_string();
    let resp = parse_generate_content_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.text(), "Use neem oil.");
    assert_eq!(resp.model, "gemini-2.5-flash-001");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 12);
    assert_eq!(resp.output_tokens, 4);
}

#[test]
fn parse_skips_thought_parts() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "thinking", "thought": true }, { "text": "answer" }] },
            "finishReason": "MAX_TOKENS"
        }]
    })
    .to_string();
    let resp = parse_generate_content_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.text(), "answer");
    assert_eq!(resp.stop_reason, "max_tokens");
    assert_eq!(resp.model, "gemini-2.5-flash");
}

#[test]
fn parse_missing_candidates_errors() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_generate_content_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}
