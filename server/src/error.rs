//! HTTP error responses
//!
//! Every failure is rendered as `{"error": message}` with 400 for client
//! mistakes, 413 for uploads over the body limit and 500 for everything
//! the server could not do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use leaf_disease::LeafDiseaseError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn model_not_loaded() -> Self {
        ApiError::Internal(LeafDiseaseError::ModelUnavailable.to_string())
    }

    pub fn upload_too_large(limit_mb: usize) -> Self {
        ApiError::PayloadTooLarge(format!(
            "Uploaded image is too large (limit is {} MB)",
            limit_mb
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) | ApiError::Internal(msg) => {
                msg
            }
        }
    }
}

impl From<LeafDiseaseError> for ApiError {
    fn from(err: LeafDiseaseError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => {
                warn!("Rejected request: {}", msg)
            }
            ApiError::Internal(msg) => error!("Error during prediction: {}", msg),
        }

        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
