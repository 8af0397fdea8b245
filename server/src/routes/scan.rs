//! Disease scan endpoint - base64 JSON upload
//!
//! Same diagnosis as `/predict` for clients that send the photo inline as
//! `{"image": "<base64>"}`, optionally as a `data:` URL.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use serde::Deserialize;

use leaf_disease::PredictionResult;

use crate::error::ApiError;
use crate::routes::predict::run_diagnosis;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub image: String,
}

/// POST /disease_scan - Diagnose a base64-encoded photo
pub async fn disease_scan(
    State(state): State<SharedState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let classifier = state.classifier().ok_or_else(ApiError::model_not_loaded)?;
    let Json(request) = payload.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::upload_too_large(state.config.max_upload_mb)
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;

    let bytes = decode_base64_image(&request.image)?;
    let result = run_diagnosis(&state, classifier, bytes, "base64 payload").await?;

    Ok(Json(result))
}

fn decode_base64_image(data: &str) -> Result<Vec<u8>, ApiError> {
    let payload = match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    }
    .trim();

    if payload.is_empty() {
        return Err(ApiError::BadRequest("No image provided".to_string()));
    }

    BASE64_STANDARD
        .decode(payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image data: {}", e)))
}
