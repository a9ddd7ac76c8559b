//! ResNet-9 Model Architecture for Plant Disease Classification
//!
//! This module implements the fixed convolutional network the disease
//! weights were trained for, using the Burn framework: four convolutional
//! stages with two residual pairs, a MaxPool head and a 38-logit linear
//! classifier. The architecture must not change; loaded weights would no
//! longer fit.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    tensor::{backend::Backend, Tensor},
};

/// Configuration for the ResNet-9 disease classifier
#[derive(Config, Debug)]
pub struct ResNet9Config {
    /// Number of output classes
    #[config(default = "38")]
    pub num_classes: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,
}

/// A convolutional block with Conv2d, BatchNorm, ReLU, and optional MaxPool
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv: Conv2d<B>,
    bn: BatchNorm<B, 2>,
    relu: Relu,
    pool: Option<MaxPool2d>,
}

impl<B: Backend> ConvBlock<B> {
    /// Create a new convolutional block
    pub fn new(in_channels: usize, out_channels: usize, with_pool: bool, device: &B::Device) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        let bn = BatchNormConfig::new(out_channels).init(device);

        let pool = if with_pool {
            Some(MaxPool2dConfig::new([4, 4]).with_strides([4, 4]).init())
        } else {
            None
        };

        Self {
            conv,
            bn,
            relu: Relu::new(),
            pool,
        }
    }

    /// Forward pass through the block
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.bn.forward(x);
        let x = self.relu.forward(x);

        match &self.pool {
            Some(pool) => pool.forward(x),
            None => x,
        }
    }
}

/// Two convolutional blocks whose output is added back onto the input
#[derive(Module, Debug)]
pub struct ResidualBlock<B: Backend> {
    block1: ConvBlock<B>,
    block2: ConvBlock<B>,
}

impl<B: Backend> ResidualBlock<B> {
    /// Create a residual pair with a constant channel count
    pub fn new(channels: usize, device: &B::Device) -> Self {
        Self {
            block1: ConvBlock::new(channels, channels, false, device),
            block2: ConvBlock::new(channels, channels, false, device),
        }
    }

    /// Forward pass with the identity shortcut
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        self.block2.forward(self.block1.forward(x.clone())) + x
    }
}

/// ResNet-9 Plant Disease Classifier
///
/// Architecture:
/// - conv1 (3 -> 64), conv2 (64 -> 128, pool /4)
/// - residual pair at 128 channels
/// - conv3 (128 -> 256, pool /4), conv4 (256 -> 512, pool /4)
/// - residual pair at 512 channels
/// - MaxPool(4), flatten, Linear(512 -> num_classes)
///
/// A 3x256x256 input reaches the head at 512x1x1.
#[derive(Module, Debug)]
pub struct ResNet9<B: Backend> {
    conv1: ConvBlock<B>,
    conv2: ConvBlock<B>,
    res1: ResidualBlock<B>,
    conv3: ConvBlock<B>,
    conv4: ConvBlock<B>,
    res2: ResidualBlock<B>,
    pool: MaxPool2d,
    fc: Linear<B>,

    num_classes: usize,
}

impl<B: Backend> ResNet9<B> {
    /// Create a new ResNet-9 from configuration
    pub fn new(config: &ResNet9Config, device: &B::Device) -> Self {
        let conv1 = ConvBlock::new(config.in_channels, 64, false, device);
        let conv2 = ConvBlock::new(64, 128, true, device); // 256 -> 64
        let res1 = ResidualBlock::new(128, device);
        let conv3 = ConvBlock::new(128, 256, true, device); // 64 -> 16
        let conv4 = ConvBlock::new(256, 512, true, device); // 16 -> 4
        let res2 = ResidualBlock::new(512, device);

        let pool = MaxPool2dConfig::new([4, 4]).with_strides([4, 4]).init(); // 4 -> 1
        let fc = LinearConfig::new(512, config.num_classes).init(device);

        Self {
            conv1,
            conv2,
            res1,
            conv3,
            conv4,
            res2,
            pool,
            fc,
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, 256, 256]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.conv1.forward(x);
        let x = self.conv2.forward(x);
        let x = self.res1.forward(x);
        let x = self.conv3.forward(x);
        let x = self.conv4.forward(x);
        let x = self.res2.forward(x);

        let x = self.pool.forward(x);

        // Flatten: [B, C, 1, 1] -> [B, C]
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        self.fc.forward(x)
    }

    /// Forward pass with softmax for inference
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InferenceBackend;

    type TestBackend = InferenceBackend;

    #[test]
    fn test_resnet9_output_shape() {
        let device = Default::default();
        let config = ResNet9Config::new();
        let model = ResNet9::<TestBackend>::new(&config, &device);

        // Single image at the trained input resolution
        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 256, 256], &device);

        let output = model.forward(input);
        let dims = output.dims();

        assert_eq!(dims[0], 1);
        assert_eq!(dims[1], 38);
    }

    #[test]
    fn test_resnet9_config_defaults() {
        let config = ResNet9Config::new();
        assert_eq!(config.num_classes, 38);
        assert_eq!(config.in_channels, 3);
    }
}
