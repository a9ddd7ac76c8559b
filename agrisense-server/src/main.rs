//! AgriSense Server
//!
//! HTTP API server exposing the crop recommendation, fertilizer
//! suggestion and disease detection operations. A thin pass-through over
//! the core service: request extraction, delegation, error conversion.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use agrisense::{AppConfig, RecommendationService};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::state::AppState;

/// AgriSense recommendation server
#[derive(Parser, Debug)]
#[command(name = "agrisense-server")]
#[command(version)]
#[command(about = "HTTP API server for crop, fertilizer and disease recommendations")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Base directory with the conventional artifact layout
    #[arg(long, env = "AGRISENSE_ARTIFACT_DIR", default_value = ".")]
    artifact_dir: PathBuf,

    /// Path to the disease model record (overrides the artifact dir layout)
    #[arg(long, env = "AGRISENSE_DISEASE_MODEL")]
    disease_model: Option<PathBuf>,

    /// Path to the crop model bundle
    #[arg(long, env = "AGRISENSE_CROP_MODEL")]
    crop_model: Option<PathBuf>,

    /// Path to the fertilizer reference table (CSV)
    #[arg(long, env = "AGRISENSE_FERTILIZER_TABLE")]
    fertilizer_table: Option<PathBuf>,

    /// Path to the disease explanation table (JSON)
    #[arg(long, env = "AGRISENSE_DISEASE_INFO")]
    disease_info: Option<PathBuf>,

    /// Path to the verdict explanation table (JSON)
    #[arg(long, env = "AGRISENSE_VERDICT_INFO")]
    verdict_info: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    // Build configuration
    let mut config = AppConfig::from_artifact_dir(&cli.artifact_dir);

    if let Some(path) = cli.disease_model {
        config.disease_model_path = path;
    }
    if let Some(path) = cli.crop_model {
        config.crop_model_path = path;
    }
    if let Some(path) = cli.fertilizer_table {
        config.fertilizer_table_path = path;
    }
    if let Some(path) = cli.disease_info {
        config.disease_info_path = path;
    }
    if let Some(path) = cli.verdict_info {
        config.verdict_info_path = path;
    }

    info!("AgriSense Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Disease model:    {:?}", config.disease_model_path);
    info!("  Crop model:       {:?}", config.crop_model_path);
    info!("  Fertilizer table: {:?}", config.fertilizer_table_path);
    info!("  Disease info:     {:?}", config.disease_info_path);
    info!("  Verdict info:     {:?}", config.verdict_info_path);

    // Load all models and tables before the listener binds; a failure
    // here aborts startup.
    let service = RecommendationService::new(&config)?;

    // Create shared state
    let state = Arc::new(AppState::new(service));

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Prediction endpoints
        .route("/crop-predict", post(routes::predict::crop_predict))
        .route(
            "/fertilizer-predict",
            post(routes::predict::fertilizer_predict),
        )
        .route("/disease-predict", post(routes::predict::disease_predict))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
