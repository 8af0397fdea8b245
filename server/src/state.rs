//! Application state for the leaf disease server
//!
//! Built once at startup and shared read-only across requests.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use leaf_disease::{Classifier, KnowledgeBase, Normalization, DEFAULT_MODEL_FILE};

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path to the model weights (CompactRecorder .mpk)
    pub model_path: PathBuf,
    /// Explicit model architecture config; defaults to the `.json` sidecar
    pub model_config_path: Option<PathBuf>,
    /// Knowledge base JSON replacing the builtin table
    pub knowledge_base_path: Option<PathBuf>,
    /// Pixel normalization the model was trained with
    pub normalization: Normalization,
    /// Maximum accepted request body in megabytes
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            model_config_path: None,
            knowledge_base_path: None,
            normalization: Normalization::default(),
            max_upload_mb: 16,
        }
    }
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// The loaded model, or `None` when loading failed at startup
    classifier: Option<Arc<Classifier>>,
    /// Label to disease record table
    pub knowledge: KnowledgeBase,
}

impl AppState {
    pub fn new(config: ServerConfig, classifier: Option<Classifier>, knowledge: KnowledgeBase) -> Self {
        Self {
            config,
            classifier: classifier.map(Arc::new),
            knowledge,
        }
    }

    /// Build the state from configuration
    ///
    /// A knowledge-base file that cannot be read is an error. A model that
    /// cannot be loaded is not: the server starts degraded and reports it
    /// through `/health`.
    pub fn bootstrap(config: ServerConfig) -> leaf_disease::Result<Self> {
        let knowledge = match &config.knowledge_base_path {
            Some(path) => {
                let kb = KnowledgeBase::from_json_file(path)?;
                info!("Loaded knowledge base from {:?}", path);
                kb
            }
            None => KnowledgeBase::builtin(),
        };
        info!("Loaded {} disease classes", knowledge.len());

        let classifier = load_classifier(&config, &knowledge);
        Ok(Self::new(config, classifier, knowledge))
    }

    /// Handle to the model, if it loaded
    pub fn classifier(&self) -> Option<Arc<Classifier>> {
        self.classifier.clone()
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn classes_count(&self) -> usize {
        self.knowledge.len()
    }
}

fn load_classifier(config: &ServerConfig, knowledge: &KnowledgeBase) -> Option<Classifier> {
    if !config.model_path.exists() {
        warn!(
            "Model file not found at {:?}. Predictions will fail until the server is restarted with a model.",
            config.model_path
        );
        return None;
    }

    match Classifier::load(
        &config.model_path,
        config.model_config_path.as_deref(),
        knowledge.labels().to_vec(),
        config.normalization,
    ) {
        Ok(classifier) => Some(classifier),
        Err(e) => {
            warn!("Error loading model: {}. Serving in degraded mode.", e);
            None
        }
    }
}

pub type SharedState = Arc<AppState>;
