//! Disease Classifier
//!
//! Wraps the pretrained ResNet-9 and maps preprocessed image tensors to
//! disease labels. The weights are loaded exactly once at startup and are
//! never mutated; classification is a single deterministic forward pass.

use std::path::Path;

use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use serde::Serialize;
use tracing::info;

use crate::backend::{default_device, InferenceBackend};
use crate::disease::preprocess::ImageTensor;
use crate::disease::resnet::{ResNet9, ResNet9Config};
use crate::disease::{class_name, NUM_CLASSES};
use crate::error::{Error, Result};

/// A single classified image
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Index into the fixed class ordering
    pub class_index: usize,
    /// The predicted disease label
    pub label: &'static str,
    /// Softmax score of the winning class
    pub confidence: f32,
}

/// Pretrained plant-disease classifier
pub struct DiseaseClassifier {
    model: ResNet9<InferenceBackend>,
    device: <InferenceBackend as Backend>::Device,
}

impl DiseaseClassifier {
    /// Load the pretrained weights from a Burn record file.
    ///
    /// Fatal if the artifact is missing or malformed; the service must not
    /// start without a usable model.
    pub fn load(path: &Path) -> Result<Self> {
        let device = default_device();

        let model = ResNet9::new(&ResNet9Config::new(), &device);
        let model = model
            .load_file(path, &CompactRecorder::new(), &device)
            .map_err(|e| Error::ModelLoad(format!("disease model at {:?}: {:?}", path, e)))?;

        info!(path = ?path, "loaded disease classification model");
        Ok(Self { model, device })
    }

    /// Classify a preprocessed image. Single forward pass, batch size 1.
    pub fn classify(&self, tensor: &ImageTensor) -> Result<Prediction> {
        let input = Tensor::<InferenceBackend, 1>::from_floats(tensor.data(), &self.device)
            .reshape([1, 3, tensor.height(), tensor.width()]);

        let output = self.model.forward_softmax(input);
        let probabilities: Vec<f32> = output
            .into_data()
            .to_vec()
            .map_err(|e| Error::Internal(format!("failed to read class scores: {:?}", e)))?;

        if probabilities.len() != NUM_CLASSES {
            return Err(Error::Internal(format!(
                "model produced {} scores, expected {}",
                probabilities.len(),
                NUM_CLASSES
            )));
        }

        let class_index = argmax(&probabilities);
        let label = class_name(class_index)
            .ok_or_else(|| Error::Internal(format!("class index {} out of range", class_index)))?;

        Ok(Prediction {
            class_index,
            label,
            confidence: probabilities[class_index],
        })
    }
}

/// Index of the maximum score; ties resolve to the lowest class index.
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        let mut scores = vec![0.0f32; 38];
        scores[5] = 0.8;
        scores[10] = 0.15;
        assert_eq!(argmax(&scores), 5);
    }

    #[test]
    fn test_argmax_tie_breaks_to_lowest_index() {
        let mut scores = vec![0.0f32; 38];
        scores[7] = 0.5;
        scores[21] = 0.5;
        assert_eq!(argmax(&scores), 7);
    }

    #[test]
    fn test_argmax_uniform() {
        let scores = vec![1.0 / 38.0; 38];
        assert_eq!(argmax(&scores), 0);
    }
}
