//! Recommendation Service
//!
//! The orchestrator owning the loaded models and knowledge base as
//! process-wide immutable state. Everything is loaded exactly once,
//! synchronously, before the first request; each operation is a
//! single-shot pure call against that registry. Concurrent invocation
//! needs no locking: inference only reads model weights.

use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::crop::{CropRecommender, SoilSample};
use crate::disease::classifier::DiseaseClassifier;
use crate::disease::preprocess;
use crate::error::Result;
use crate::fertilizer::{DeficiencyVerdict, NutrientDelta};
use crate::knowledge::KnowledgeBase;

/// A classified leaf image with its explanatory text
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseReport {
    pub label: String,
    pub confidence: f32,
    pub description: String,
}

/// A fertilizer correction with its explanatory text and asset key
#[derive(Debug, Clone, Serialize)]
pub struct FertilizerAdvice {
    pub verdict: DeficiencyVerdict,
    pub description: String,
    pub asset: String,
}

/// The immutable model registry and its three operations
pub struct RecommendationService {
    disease: DiseaseClassifier,
    crop: CropRecommender,
    knowledge: KnowledgeBase,
}

impl RecommendationService {
    /// Load every model and table. Any failure here is fatal: the process
    /// must not begin serving until the whole registry is in place.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let disease = DiseaseClassifier::load(&config.disease_model_path)?;
        let crop = CropRecommender::load(&config.crop_model_path)?;
        let knowledge = KnowledgeBase::load(config)?;

        info!("recommendation service ready");
        Ok(Self {
            disease,
            crop,
            knowledge,
        })
    }

    /// Detect a plant disease on a leaf photograph.
    ///
    /// Returns `ImageDecodeError` as a value for unparsable bytes; never
    /// propagates a raw decode fault.
    pub fn classify_disease(&self, image_bytes: &[u8]) -> Result<DiseaseReport> {
        let tensor = preprocess::preprocess(image_bytes)?;
        let prediction = self.disease.classify(&tensor)?;
        let description = self.knowledge.disease_text(prediction.label)?.to_string();

        Ok(DiseaseReport {
            label: prediction.label.to_string(),
            confidence: prediction.confidence,
            description,
        })
    }

    /// Recommend a crop for the given soil and climate measurements.
    pub fn recommend_crop(&self, sample: &SoilSample) -> Result<String> {
        self.crop.recommend(sample)
    }

    /// Recommend a fertilizer correction for a crop and measured N/P/K.
    pub fn recommend_fertilizer(
        &self,
        crop_name: &str,
        measured_n: i64,
        measured_p: i64,
        measured_k: i64,
    ) -> Result<FertilizerAdvice> {
        let profile = self.knowledge.profile(crop_name)?;
        let verdict = NutrientDelta::between(profile, measured_n, measured_p, measured_k).verdict();
        let info = self.knowledge.verdict_info(verdict)?;

        Ok(FertilizerAdvice {
            verdict,
            description: info.text.clone(),
            asset: info.asset.clone(),
        })
    }
}
