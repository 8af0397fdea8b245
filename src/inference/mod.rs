//! Inference module: from uploaded bytes to a class prediction
//!
//! This module provides:
//! - Image decoding, resizing and normalization
//! - The model wrapper holding the single loaded network
//! - Softmax/argmax post-processing

pub mod classifier;
pub mod preprocess;

pub use classifier::{argmax, softmax, Classifier, Prediction};
pub use preprocess::{decode_image, preprocess, Normalization};
