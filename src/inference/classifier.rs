//! Model wrapper
//!
//! Owns the single loaded network and turns an RGB image into a
//! `(class, confidence)` prediction: preprocess, forward pass, softmax over
//! the logits, argmax.
//!
//! Forward passes are serialized through a mutex around the one model
//! instance. Burn modules are `Send` but make no promise of being safe for
//! concurrent forward passes on every backend.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use burn::config::Config;
use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::{Tensor, TensorData};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::{default_device, InferenceBackend, InferenceDevice};
use crate::inference::preprocess::{preprocess, Normalization};
use crate::model::{LeafClassifier, LeafClassifierConfig};
use crate::utils::error::{LeafDiseaseError, Result};

/// Outcome of one forward pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Argmax over the softmax output
    pub class_index: usize,

    /// Class label for `class_index`
    pub label: String,

    /// Softmax probability of the predicted class, in [0, 1]
    pub confidence: f32,

    /// Wall time of the forward pass in milliseconds
    pub inference_time_ms: f64,
}

impl Prediction {
    /// Confidence as a percentage in [0, 100]
    pub fn confidence_percent(&self) -> f32 {
        (self.confidence * 100.0).clamp(0.0, 100.0)
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest element; ties resolve to the lowest index
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

/// The loaded classifier plus everything needed to interpret its output
pub struct Classifier {
    model: Mutex<LeafClassifier<InferenceBackend>>,
    config: LeafClassifierConfig,
    labels: Vec<String>,
    normalization: Normalization,
    device: InferenceDevice,
}

impl Classifier {
    /// Wrap an already constructed network
    pub fn new(
        model: LeafClassifier<InferenceBackend>,
        config: LeafClassifierConfig,
        labels: Vec<String>,
        normalization: Normalization,
    ) -> Result<Self> {
        config.validate().map_err(LeafDiseaseError::Config)?;
        if labels.is_empty() {
            return Err(LeafDiseaseError::Config("class label list is empty".to_string()));
        }
        if model.num_classes() != labels.len() {
            warn!(
                "Model predicts {} classes but {} labels are configured; unmatched indices map to placeholder labels",
                model.num_classes(),
                labels.len()
            );
        }

        Ok(Self {
            model: Mutex::new(model),
            config,
            labels,
            normalization,
            device: default_device(),
        })
    }

    /// Load network weights from a `CompactRecorder` file
    ///
    /// The architecture comes from `config_path`, else from a `.json`
    /// sidecar next to the weights, else from the defaults sized to the
    /// label list.
    pub fn load(
        model_path: &Path,
        config_path: Option<&Path>,
        labels: Vec<String>,
        normalization: Normalization,
    ) -> Result<Self> {
        if !model_path.is_file() {
            return Err(LeafDiseaseError::ModelLoad(
                model_path.to_path_buf(),
                "file not found".to_string(),
            ));
        }

        let config = resolve_config(model_path, config_path, labels.len())?;
        config.validate().map_err(LeafDiseaseError::Config)?;

        let device = default_device();
        let model = LeafClassifier::<InferenceBackend>::new(&config, &device)
            .load_file(model_path.to_path_buf(), &CompactRecorder::new(), &device)
            .map_err(|e| LeafDiseaseError::ModelLoad(model_path.to_path_buf(), format!("{:?}", e)))?;

        info!(
            "Loaded model from {:?} ({} classes, {}x{} input)",
            model_path,
            model.num_classes(),
            config.input_size,
            config.input_size
        );

        Self::new(model, config, labels, normalization)
    }

    /// Run the full image-to-prediction path for one image
    pub fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        let size = self.config.input_size;
        let pixels = preprocess(image, size, self.normalization);

        let start = Instant::now();
        let input = Tensor::<InferenceBackend, 4>::from_data(
            TensorData::new(pixels, [1, 3, size, size]),
            &self.device,
        );

        let output = {
            // Forward passes only read the model
            let model = self.model.lock().unwrap_or_else(|poisoned| {
                warn!("Recovering model lock after a panicked forward pass");
                self.model.clear_poison();
                poisoned.into_inner()
            });
            model.forward(input)
        };

        let logits: Vec<f32> = output
            .into_data()
            .to_vec()
            .map_err(|e| LeafDiseaseError::Inference(format!("failed to read model output: {:?}", e)))?;

        self.classify_logits(&logits, start.elapsed())
    }

    /// Softmax and argmax over raw model outputs
    pub fn classify_logits(&self, logits: &[f32], elapsed: Duration) -> Result<Prediction> {
        if logits.is_empty() {
            return Err(LeafDiseaseError::Inference("model produced no outputs".to_string()));
        }
        if logits.iter().any(|v| !v.is_finite()) {
            return Err(LeafDiseaseError::Inference("model produced non-finite logits".to_string()));
        }

        let probabilities = softmax(logits);
        let (class_index, confidence) = argmax(&probabilities)
            .ok_or_else(|| LeafDiseaseError::Inference("empty probability vector".to_string()))?;

        let prediction = Prediction {
            class_index,
            label: self.label_for(class_index),
            confidence,
            inference_time_ms: elapsed.as_secs_f64() * 1000.0,
        };

        debug!(
            "Prediction: {} (class {}) {:.2}% in {:.2} ms",
            prediction.label,
            prediction.class_index,
            prediction.confidence_percent(),
            prediction.inference_time_ms
        );

        Ok(prediction)
    }

    /// Label for a class index, or a `class_<index>` placeholder
    pub fn label_for(&self, class_index: usize) -> String {
        self.labels
            .get(class_index)
            .cloned()
            .unwrap_or_else(|| format!("class_{}", class_index))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub fn num_classes(&self) -> usize {
        self.config.num_classes
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }
}

fn resolve_config(
    model_path: &Path,
    config_path: Option<&Path>,
    num_labels: usize,
) -> Result<LeafClassifierConfig> {
    let sidecar: PathBuf = model_path.with_extension("json");
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None if sidecar.is_file() => Some(sidecar),
        None => None,
    };

    match path {
        Some(path) => {
            debug!("Reading model config from {:?}", path);
            LeafClassifierConfig::load(&path).map_err(|e| {
                LeafDiseaseError::Config(format!("model config '{}': {:?}", path.display(), e))
            })
        }
        None => Ok(LeafClassifierConfig::new().with_num_classes(num_labels)),
    }
}
