//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub classes_count: usize,
}

/// GET /health - Model load status and class count
///
/// Always 200; a failed model load shows up as `model_loaded: false`.
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let model_loaded = state.model_loaded();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        model_loaded,
        classes_count: state.classes_count(),
    })
}
