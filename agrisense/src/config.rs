//! Startup Configuration
//!
//! Every model and knowledge-table artifact is located through an explicit
//! configuration structure supplied by the caller; no path is hardcoded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Locations of the artifacts loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Burn record file with the disease-classifier weights
    pub disease_model_path: PathBuf,
    /// Bincode bundle with the crop recommendation forest and its labels
    pub crop_model_path: PathBuf,
    /// CSV reference table with columns Crop,N,P,K
    pub fertilizer_table_path: PathBuf,
    /// JSON table mapping disease labels to explanatory text
    pub disease_info_path: PathBuf,
    /// JSON table mapping verdict keys to explanatory text and asset keys
    pub verdict_info_path: PathBuf,
}

impl AppConfig {
    /// Derive the conventional artifact layout below a base directory.
    pub fn from_artifact_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            disease_model_path: dir.join("models/plant_disease_model.mpk"),
            crop_model_path: dir.join("models/crop_model.bin"),
            fertilizer_table_path: dir.join("data/fertilizer.csv"),
            disease_info_path: dir.join("data/disease_info.json"),
            verdict_info_path: dir.join("data/verdict_info.json"),
        }
    }

    /// Check that every artifact exists before any deserialization starts.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("disease model", &self.disease_model_path),
            ("crop model", &self.crop_model_path),
            ("fertilizer reference table", &self.fertilizer_table_path),
            ("disease explanation table", &self.disease_info_path),
            ("verdict explanation table", &self.verdict_info_path),
        ] {
            if !path.exists() {
                return Err(Error::ModelLoad(format!(
                    "{} not found at {:?}",
                    name, path
                )));
            }
        }
        Ok(())
    }
}
