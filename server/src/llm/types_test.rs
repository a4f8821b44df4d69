use super::*;

// =============================================================================
// LlmError Display
// =============================================================================

#[test]
fn display_config_parse() {
    let err = LlmError::ConfigParse("bad config".into());
    assert!(err.to_string().contains("bad config"));
}

#[test]
fn display_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "MY_KEY".into() };
    assert!(err.to_string().contains("MY_KEY"));
}

#[test]
fn display_api_response_includes_status() {
    let err = LlmError::ApiResponse { status: 503, body: "unavailable".into() };
    assert!(err.to_string().contains("503"));
}

// =============================================================================
// ContentBlock serde
// =============================================================================

#[test]
fn image_block_serializes_in_anthropic_shape() {
    let block = ContentBlock::Image { source: ImageSource::base64("image/png", "AAAA") };
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "image",
            "source": { "type": "base64", "media_type": "image/png", "data": "AAAA" }
        })
    );
}

#[test]
fn unknown_block_type_deserializes_to_unknown() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"tool_use","id":"x"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn text_content_serializes_as_plain_string() {
    let msg = Message::user_text("hello");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "hello" }));
}

#[test]
fn user_image_puts_image_before_instruction() {
    let msg = Message::user_image(ImageSource::base64("image/jpeg", "Zm9v"), "describe");
    let Content::Blocks(blocks) = msg.content else {
        panic!("expected blocks");
    };
    assert!(matches!(&blocks[0], ContentBlock::Image { .. }));
    assert!(matches!(&blocks[1], ContentBlock::Text { text } if text == "describe"));
}

#[test]
fn data_url_embeds_media_type() {
    let src = ImageSource::base64("image/webp", "QUJD");
    assert_eq!(src.data_url(), "data:image/webp;base64,QUJD");
}

// =============================================================================
// ChatResponse::text
// =============================================================================

#[test]
fn response_text_joins_text_blocks_and_skips_others() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Thinking { thinking: "hmm".into() },
            ContentBlock::Text { text: "  Water ".into() },
            ContentBlock::Text { text: "early.  ".into() },
        ],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.text(), "Water early.");
}

#[test]
fn response_text_empty_without_text_blocks() {
    let resp = ChatResponse {
        content: vec![],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert!(resp.text().is_empty());
}
