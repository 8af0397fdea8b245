//! Diagnosis: a prediction merged with its knowledge-base record
//!
//! This is the per-request result the HTTP layer serializes.

use serde::{Deserialize, Serialize};

use crate::inference::{decode_image, Classifier, Prediction};
use crate::knowledge::{KnowledgeBase, Severity};
use crate::utils::error::Result;

/// Structured diagnosis for one uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Human-readable disease name
    pub disease: String,

    /// Softmax probability of the predicted class, as a percentage in [0, 100]
    pub confidence: f32,

    pub severity: Severity,
    pub treatment: String,
    pub prevention: String,

    /// Class label exactly as the model emitted it
    pub raw_class: String,
}

impl PredictionResult {
    /// Merge a prediction with the record for its label
    pub fn from_prediction(prediction: &Prediction, knowledge: &KnowledgeBase) -> Self {
        let record = knowledge.lookup(&prediction.label);

        Self {
            disease: record.name,
            confidence: prediction.confidence_percent(),
            severity: record.severity,
            treatment: record.treatment,
            prevention: record.prevention,
            raw_class: prediction.label.clone(),
        }
    }
}

/// Decode, classify and look up one encoded image
///
/// Blocking: runs a forward pass on the calling thread.
pub fn diagnose(
    classifier: &Classifier,
    knowledge: &KnowledgeBase,
    image_bytes: &[u8],
) -> Result<(Prediction, PredictionResult)> {
    let image = decode_image(image_bytes)?;
    let prediction = classifier.predict(&image)?;
    let result = PredictionResult::from_prediction(&prediction, knowledge);
    Ok((prediction, result))
}
