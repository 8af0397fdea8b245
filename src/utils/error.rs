//! Error Handling Module
//!
//! Defines the error type shared by model loading, preprocessing,
//! inference and the knowledge base. Uses thiserror for ergonomic error
//! definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for leaf disease diagnosis
#[derive(Error, Debug)]
pub enum LeafDiseaseError {
    /// The classifier failed to load at startup, so no prediction can run
    #[error("Model not loaded")]
    ModelUnavailable,

    /// Error reading or restoring the model artifact
    #[error("Failed to load model at '{0}': {1}")]
    ModelLoad(PathBuf, String),

    /// Uploaded bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// Forward pass or output post-processing failed
    #[error("Prediction error: {0}")]
    Inference(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid client input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LeafDiseaseError {
    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, LeafDiseaseError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for LeafDiseaseError {
    fn from(err: serde_json::Error) -> Self {
        LeafDiseaseError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for LeafDiseaseError {
    fn from(err: image::ImageError) -> Self {
        LeafDiseaseError::ImageDecode(err.to_string())
    }
}

/// Convenience Result type for leaf disease operations
pub type Result<T> = std::result::Result<T, LeafDiseaseError>;
