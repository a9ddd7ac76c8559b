//! # AgriSense
//!
//! Agronomic decision-support core: given soil and climate measurements it
//! recommends a crop; given a crop and measured soil nutrients it recommends
//! a fertilizer correction; given a leaf photograph it detects a plant
//! disease.
//!
//! ## Modules
//!
//! - `disease`: image preprocessing and the pretrained ResNet-9 leaf classifier
//! - `crop`: the pretrained tabular crop recommender
//! - `fertilizer`: the nutrient-deficiency decision
//! - `knowledge`: static, validated lookup tables
//! - `service`: the orchestrator owning the loaded models
//!
//! Models and tables are loaded exactly once at startup and stay immutable
//! for the life of the process; every operation is a pure request/response
//! call, so concurrent reads need no coordination.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agrisense::{AppConfig, RecommendationService, SoilSample};
//!
//! let config = AppConfig::from_artifact_dir("/opt/agrisense");
//! let service = RecommendationService::new(&config)?;
//!
//! let crop = service.recommend_crop(&SoilSample {
//!     nitrogen: 90, phosphorus: 42, potassium: 43,
//!     temperature: 20.8, humidity: 82.0, ph: 6.5, rainfall: 202.9,
//! })?;
//! ```

pub mod backend;
pub mod config;
pub mod crop;
pub mod disease;
pub mod error;
pub mod fertilizer;
pub mod knowledge;
pub mod service;

// Re-export commonly used items for convenience
pub use config::AppConfig;
pub use crop::{CropRecommender, SoilSample};
pub use disease::classifier::{DiseaseClassifier, Prediction};
pub use disease::preprocess::{preprocess, ImageTensor};
pub use error::{Error, Result};
pub use fertilizer::{DeficiencyVerdict, Nutrient, NutrientDelta, NutrientProfile};
pub use knowledge::{KnowledgeBase, VerdictInfo};
pub use service::{DiseaseReport, FertilizerAdvice, RecommendationService};

/// Number of disease classes produced by the image classifier
pub const NUM_CLASSES: usize = disease::NUM_CLASSES;

/// Spatial input size of the disease classifier
pub const IMAGE_SIZE: usize = 256;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
