//! Disease route: `POST /disease/predict` (multipart field `file`).

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::{check_rate_limit, error_response};
use crate::services::disease::{self, DiseaseError};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

/// An uploaded image part.
pub struct Upload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub async fn predict(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let content_type = field.content_type().unwrap_or_default().to_owned();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some(Upload { content_type, bytes: bytes.to_vec() });
                        break;
                    }
                    Err(e) => return error_response(e.status(), e.body_text()),
                }
            }
            Ok(None) => break,
            Err(e) => return error_response(e.status(), e.body_text()),
        }
    }

    predict_upload(&state, peer.ip(), upload).await
}

/// Validate, rate-limit and classify an upload.
pub(crate) async fn predict_upload(state: &AppState, peer: IpAddr, upload: Option<Upload>) -> Response {
    let Some(upload) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "Upload an image");
    };
    if !disease::is_image_content_type(&upload.content_type) {
        return error_response(StatusCode::BAD_REQUEST, "Upload an image");
    }
    let Some(llm) = state.llm.clone() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Disease detection not configured");
    };
    if let Err(resp) = check_rate_limit(state, peer) {
        return resp;
    }

    match disease::predict(&llm, &upload.content_type, &upload.bytes).await {
        Ok(prediction) => Json(prediction).into_response(),
        Err(DiseaseError::NotAnImage | DiseaseError::EmptyUpload) => {
            error_response(StatusCode::BAD_REQUEST, "Upload an image")
        }
        Err(DiseaseError::Llm(e)) => {
            tracing::error!(error = %e, "disease LLM call failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Disease detection failed.")
        }
    }
}

#[cfg(test)]
#[path = "disease_test.rs"]
mod tests;
