//! Application state for the AgriSense server

use std::sync::Arc;
use std::time::Instant;

use agrisense::RecommendationService;

/// Shared application state
pub struct AppState {
    /// The immutable model registry and knowledge base
    pub service: RecommendationService,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
