//! Model module for the CNN architecture using the Burn framework
//!
//! This module provides:
//! - The CNN used for leaf disease classification
//! - Its serializable configuration

pub mod cnn;

pub use cnn::{LeafClassifier, LeafClassifierConfig};

/// Number of classes the exported model predicts
pub const DEFAULT_NUM_CLASSES: usize = 16;

/// Square input resolution the model was trained at
pub const DEFAULT_INPUT_SIZE: usize = 224;
