//! Prediction endpoint - multipart image upload

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use leaf_disease::{diagnose, Classifier, PredictionResult};

use crate::error::ApiError;
use crate::state::SharedState;

/// Multipart field carrying the photo
const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub result: PredictionResult,
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// POST /predict - Diagnose the leaf photo in the `image` form field
pub async fn predict(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let classifier = state.classifier().ok_or_else(ApiError::model_not_loaded)?;

    // Not a multipart body at all: there is no file part to find
    let mut multipart = multipart.map_err(|_| ApiError::BadRequest("No image provided".to_string()))?;

    let upload = find_image_upload(&mut multipart, state.config.max_upload_mb)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;

    if upload.file_name.is_empty() {
        return Err(ApiError::BadRequest("No image selected".to_string()));
    }
    if upload.bytes.is_empty() {
        return Err(ApiError::BadRequest("Uploaded image is empty".to_string()));
    }

    let result = run_diagnosis(&state, classifier, upload.bytes, &upload.file_name).await?;

    Ok(Json(PredictResponse {
        success: true,
        result,
    }))
}

/// First file part named `image`; plain form fields of that name are skipped
async fn find_image_upload(
    multipart: &mut Multipart,
    limit_mb: usize,
) -> Result<Option<Upload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_mb, "Malformed multipart body"))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit_mb, "Failed to read upload"))?;

        return Ok(Some(Upload {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

/// Body-limit hits surface as multipart errors with a 413 status
fn multipart_error(err: MultipartError, limit_mb: usize, context: &str) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::upload_too_large(limit_mb)
    } else {
        ApiError::BadRequest(format!("{}: {}", context, err.body_text()))
    }
}

/// Decode, classify and look up on the blocking pool
pub(crate) async fn run_diagnosis(
    state: &SharedState,
    classifier: Arc<Classifier>,
    bytes: Vec<u8>,
    source: &str,
) -> Result<PredictionResult, ApiError> {
    let state = Arc::clone(state);
    let (prediction, result) =
        tokio::task::spawn_blocking(move || diagnose(&classifier, &state.knowledge, &bytes))
            .await
            .map_err(|e| ApiError::Internal(format!("Prediction task failed: {}", e)))??;

    info!(
        "Prediction for '{}': {} ({}) {:.2}% in {:.1} ms",
        source, result.disease, prediction.label, result.confidence, prediction.inference_time_ms
    );

    Ok(result)
}
