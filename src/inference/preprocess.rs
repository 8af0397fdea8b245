//! Image decoding and preprocessing
//!
//! Turns uploaded bytes into the flat CHW float buffer the classifier
//! consumes: decode, convert to RGB, resize to the model's square input,
//! then scale the 8-bit channel values for the model.

use std::str::FromStr;

use image::{imageops::FilterType, DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::utils::error::{LeafDiseaseError, Result};

/// ImageNet normalization mean values (RGB)
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet normalization std values (RGB)
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Scaling applied to 8-bit channel values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Subtract the ImageNet mean and divide by its std, per channel
    #[default]
    ImageNet,
    /// Divide by 255, giving values in [0, 1]
    Unit,
    /// Keep the raw [0, 255] values for models that rescale internally
    Raw,
}

impl Normalization {
    fn apply(&self, byte: u8, channel: usize) -> f32 {
        let value = byte as f32;
        match self {
            Normalization::ImageNet => {
                (value / 255.0 - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel]
            }
            Normalization::Unit => value / 255.0,
            Normalization::Raw => value,
        }
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imagenet" => Ok(Normalization::ImageNet),
            "unit" => Ok(Normalization::Unit),
            "raw" | "none" => Ok(Normalization::Raw),
            other => Err(format!(
                "unknown normalization '{}', expected 'imagenet', 'unit' or 'raw'",
                other
            )),
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalization::ImageNet => write!(f, "imagenet"),
            Normalization::Unit => write!(f, "unit"),
            Normalization::Raw => write!(f, "raw"),
        }
    }
}

/// Decode an uploaded image from its encoded bytes
///
/// Any format the `image` crate recognizes is accepted.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(LeafDiseaseError::InvalidInput("image data is empty".to_string()));
    }
    Ok(image::load_from_memory(bytes)?)
}

/// Convert to RGB and resize to a `size` x `size` square
pub fn resize_rgb(image: &DynamicImage, size: u32) -> RgbImage {
    let rgb = match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        other => other.to_rgb8(),
    };
    if rgb.dimensions() == (size, size) {
        return rgb;
    }
    image::imageops::resize(&rgb, size, size, FilterType::Triangle)
}

/// Normalize an RGB image to a flat vector in CHW layout: [C, H, W] flattened
pub fn normalize_image(image: &RgbImage, normalization: Normalization) -> Vec<f32> {
    let (width, height) = image.dimensions();
    let num_pixels = (width * height) as usize;

    let mut normalized = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in image.pixels().enumerate() {
        for channel in 0..3 {
            // All R values, then all G values, then all B values
            normalized[channel * num_pixels + i] = normalization.apply(pixel[channel], channel);
        }
    }

    normalized
}

/// Resize and normalize an image for a model with the given input size
pub fn preprocess(image: &DynamicImage, size: usize, normalization: Normalization) -> Vec<f32> {
    let resized = resize_rgb(image, size as u32);
    normalize_image(&resized, normalization)
}
