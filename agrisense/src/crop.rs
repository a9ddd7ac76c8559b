//! Crop Recommendation
//!
//! Wraps the pretrained random-forest ensemble that maps a 7-feature
//! soil/climate vector to a crop label. The serialized artifact bundles
//! the forest with its ordered label table, so the closed label set
//! always matches the trained model.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use crate::error::{Error, Result};

/// Number of features in the soil sample vector
pub const NUM_FEATURES: usize = 7;

/// Soil and climate measurements for crop recommendation.
///
/// The model input vector order is fixed:
/// [N, P, K, temperature, humidity, pH, rainfall].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    pub ph: f64,
    /// Rainfall in millimeters
    pub rainfall: f64,
}

impl SoilSample {
    /// Reject non-finite measurements before they reach the model.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("pH", self.ph),
            ("rainfall", self.rainfall),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }
        Ok(())
    }

    /// The model input vector, in training feature order.
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.nitrogen as f64,
            self.phosphorus as f64,
            self.potassium as f64,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

/// On-disk bundle: the trained forest together with its ordered label table
#[derive(Serialize, Deserialize, Debug)]
pub struct CropModel {
    /// Class index -> crop label, in training order
    pub labels: Vec<String>,
    pub forest: RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>,
}

/// Recommends a crop from a soil sample using the pretrained ensemble
#[derive(Debug)]
pub struct CropRecommender {
    model: CropModel,
}

impl CropRecommender {
    /// Load the serialized model bundle. Fatal if unreadable.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::ModelLoad(format!("crop model at {:?}: {}", path, e)))?;
        let recommender = Self::from_reader(BufReader::new(file))?;

        info!(
            path = ?path,
            labels = recommender.model.labels.len(),
            "loaded crop recommendation model"
        );
        Ok(recommender)
    }

    /// Deserialize the model bundle from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let model: CropModel = bincode::deserialize_from(reader)
            .map_err(|e| Error::ModelLoad(format!("crop model: {}", e)))?;

        if model.labels.is_empty() {
            return Err(Error::ModelLoad(
                "crop model has an empty label table".to_string(),
            ));
        }
        Ok(Self { model })
    }

    /// The closed set of labels this model can produce
    pub fn labels(&self) -> &[String] {
        &self.model.labels
    }

    /// Recommend a crop for the given sample.
    ///
    /// Deterministic: identical input and model state always yield the
    /// same label. No online updates.
    pub fn recommend(&self, sample: &SoilSample) -> Result<String> {
        sample.validate()?;

        let features = DenseMatrix::from_2d_vec(&vec![sample.features()])
            .map_err(|e| Error::Internal(format!("feature matrix: {}", e)))?;

        let predicted = self
            .model
            .forest
            .predict(&features)
            .map_err(|e| Error::Internal(format!("crop model prediction: {}", e)))?;

        let class = predicted
            .first()
            .copied()
            .ok_or_else(|| Error::Internal("crop model returned no prediction".to_string()))?;

        self.model
            .labels
            .get(class as usize)
            .cloned()
            .ok_or_else(|| {
                Error::Internal(format!("crop model produced out-of-range class {}", class))
            })
    }
}
