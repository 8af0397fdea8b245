//! Class listing endpoint

use axum::{extract::State, Json};

use leaf_disease::KnowledgeBase;

use crate::state::SharedState;

/// GET /classes - Label set and the full knowledge base
///
/// Body: `{"classes": [label...], "disease_info": {label: record}}`.
pub async fn list_classes(State(state): State<SharedState>) -> Json<KnowledgeBase> {
    Json(state.knowledge.clone())
}
