//! # Leaf Disease Diagnosis
//!
//! Library behind the leaf disease HTTP service: a Burn CNN classifier,
//! the image preprocessing it expects, and the knowledge base that turns
//! a predicted class label into treatment and prevention advice.
//!
//! ## Modules
//!
//! - `model`: CNN architecture and its configuration
//! - `inference`: image decoding/preprocessing and the model wrapper
//! - `knowledge`: class label to disease record table
//! - `diagnosis`: prediction merged with its record
//! - `utils`: logging and error handling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leaf_disease::{diagnose, Classifier, KnowledgeBase, Normalization};
//!
//! let knowledge = KnowledgeBase::builtin();
//! let classifier = Classifier::load(
//!     "leaf_disease_model.mpk".as_ref(),
//!     None,
//!     knowledge.labels().to_vec(),
//!     Normalization::ImageNet,
//! )?;
//! let (_, result) = diagnose(&classifier, &knowledge, &std::fs::read("leaf.jpg")?)?;
//! println!("{} ({:.1}%)", result.disease, result.confidence);
//! ```

pub mod backend;
pub mod diagnosis;
pub mod inference;
pub mod knowledge;
pub mod model;
pub mod utils;

pub use diagnosis::{diagnose, PredictionResult};
pub use inference::{Classifier, Normalization, Prediction};
pub use knowledge::{DiseaseRecord, KnowledgeBase, Severity};
pub use model::{LeafClassifier, LeafClassifierConfig};
pub use utils::error::{LeafDiseaseError, Result};

/// Default model artifact file name
pub const DEFAULT_MODEL_FILE: &str = "leaf_disease_model.mpk";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
