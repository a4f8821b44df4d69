use std::sync::Arc;

use super::*;
use crate::llm::LlmChat;
use crate::state::test_helpers::{self, MockLlm};

fn peer() -> IpAddr {
    IpAddr::from([10, 1, 1, 1])
}

fn upload(content_type: &str, bytes: &[u8]) -> Option<Upload> {
    Some(Upload { content_type: content_type.into(), bytes: bytes.to_vec() })
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_file_is_400() {
    let state = test_helpers::test_app_state_with_llm(MockLlm::replying("{}") as Arc<dyn LlmChat>);
    let resp = predict_upload(&state, peer(), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["detail"], "Upload an image");
}

#[tokio::test]
async fn non_image_is_400_without_model_call() {
    let mock = MockLlm::replying("{}");
    let state = test_helpers::test_app_state_with_llm(mock.clone() as Arc<dyn LlmChat>);
    let resp = predict_upload(&state, peer(), upload("application/pdf", b"%PDF")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn image_returns_prediction() {
    let answer = r#"{"label":"potato_late_blight","confidence":0.8,"summary":"Symptoms: dark lesions"}"#;
    let state = test_helpers::test_app_state_with_llm(MockLlm::replying(answer) as Arc<dyn LlmChat>);
    let resp = predict_upload(&state, peer(), upload("image/jpeg", b"jpegbytes")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["label"], "potato_late_blight");
    assert_eq!(body["confidence"], 0.8);
    assert_eq!(body["result"], "Symptoms: dark lesions");
}

#[tokio::test]
async fn model_failure_is_500() {
    let state = test_helpers::test_app_state_with_llm(MockLlm::failing(503) as Arc<dyn LlmChat>);
    let resp = predict_upload(&state, peer(), upload("image/png", b"png")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unconfigured_llm_is_503() {
    let state = test_helpers::test_app_state();
    let resp = predict_upload(&state, peer(), upload("image/png", b"png")).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
