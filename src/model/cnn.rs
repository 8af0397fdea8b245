//! CNN Model Architecture for Leaf Disease Classification
//!
//! Convolutional network built with Burn. The service never trains it: the
//! weights come from a `CompactRecorder` record produced elsewhere, and
//! only the forward pass is used here.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d,
        Relu,
    },
    tensor::{backend::Backend, Tensor},
};

use super::{DEFAULT_INPUT_SIZE, DEFAULT_NUM_CLASSES};

/// Configuration for the LeafClassifier CNN model
///
/// Stored as a JSON sidecar next to the weights when the exported network
/// differs from the defaults.
#[derive(Config, Debug)]
pub struct LeafClassifierConfig {
    /// Number of output classes
    #[config(default = "DEFAULT_NUM_CLASSES")]
    pub num_classes: usize,

    /// Input image size (assumes square images)
    #[config(default = "DEFAULT_INPUT_SIZE")]
    pub input_size: usize,

    /// Dropout rate used by the classifier head during training
    #[config(default = "0.3")]
    pub dropout_rate: f64,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Base number of convolutional filters
    #[config(default = "32")]
    pub base_filters: usize,
}

impl LeafClassifierConfig {
    /// Check the values a forward pass depends on
    pub fn validate(&self) -> Result<(), String> {
        if self.num_classes == 0 {
            return Err("num_classes must be greater than 0".to_string());
        }
        if self.in_channels != 3 {
            return Err(format!("in_channels must be 3 (RGB), got {}", self.in_channels));
        }
        // Four 2x2 pooling stages
        if self.input_size < 16 {
            return Err(format!("input_size must be at least 16, got {}", self.input_size));
        }
        if self.base_filters == 0 {
            return Err("base_filters must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// A CNN block with Conv2d, BatchNorm, ReLU and MaxPool
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub bn: BatchNorm<B>,
    pub relu: Relu,
    pub pool: MaxPool2d,
}

impl<B: Backend> ConvBlock<B> {
    pub fn new(in_channels: usize, out_channels: usize, device: &B::Device) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        Self {
            conv,
            bn: BatchNormConfig::new(out_channels).init(device),
            relu: Relu::new(),
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
        }
    }

    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.bn.forward(x);
        let x = self.relu.forward(x);
        self.pool.forward(x)
    }
}

/// Leaf Disease Classifier CNN
///
/// Architecture:
/// - 4 convolutional blocks doubling the filter count, each halving the resolution
/// - Global Average Pooling
/// - Fully connected classifier with dropout
///
/// `forward` returns raw logits; softmax is applied by the caller.
#[derive(Module, Debug)]
pub struct LeafClassifier<B: Backend> {
    pub conv1: ConvBlock<B>,
    pub conv2: ConvBlock<B>,
    pub conv3: ConvBlock<B>,
    pub conv4: ConvBlock<B>,

    pub global_pool: AdaptiveAvgPool2d,

    pub fc1: Linear<B>,
    pub dropout: Dropout,
    pub fc2: Linear<B>,

    num_classes: usize,
}

impl<B: Backend> LeafClassifier<B> {
    /// Create a randomly initialized network from configuration
    pub fn new(config: &LeafClassifierConfig, device: &B::Device) -> Self {
        let base = config.base_filters;

        // 3 -> base -> 2*base -> 4*base -> 8*base
        let conv1 = ConvBlock::new(config.in_channels, base, device);
        let conv2 = ConvBlock::new(base, base * 2, device);
        let conv3 = ConvBlock::new(base * 2, base * 4, device);
        let conv4 = ConvBlock::new(base * 4, base * 8, device);

        Self {
            conv1,
            conv2,
            conv3,
            conv4,
            global_pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            fc1: LinearConfig::new(base * 8, 256).init(device),
            dropout: DropoutConfig::new(config.dropout_rate).init(),
            fc2: LinearConfig::new(256, config.num_classes).init(device),
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, height, width]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.conv1.forward(x);
        let x = self.conv2.forward(x);
        let x = self.conv3.forward(x);
        let x = self.conv4.forward(x);

        // [B, C, H, W] -> [B, C, 1, 1] -> [B, C]
        let x = self.global_pool.forward(x);
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        let x = self.fc1.forward(x);
        let x = Relu::new().forward(x);
        let x = self.dropout.forward(x);
        self.fc2.forward(x)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}
