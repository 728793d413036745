//! Credit Risk API Server
//!
//! REST API for scoring loan applicants and browsing the model reports.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inference_engine::{ConfigurationError, InferencePipeline, ModelArtifacts};
use input_validator::Validator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reporting::ChartAssets;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
mod routes;

pub use config::{AppConfig, LoggingConfig, ReportsConfig, ServerConfig};
pub use error::ApiError;

/// Application state shared across handlers.
///
/// Everything in here is read-only after startup, so handlers share it
/// through an `Arc` without a lock.
pub struct AppState {
    /// Prediction pipeline over the loaded artifacts
    pub pipeline: InferencePipeline,
    /// Form input validator
    pub validator: Validator,
    /// Report file locations
    pub reports: ReportsConfig,
    /// Chart images
    pub charts: ChartAssets,
    /// Prometheus handle, when the exporter is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: InferencePipeline, validator: Validator, reports: ReportsConfig) -> Self {
        Self {
            pipeline,
            validator,
            charts: ChartAssets::new(reports.charts_dir.clone()),
            reports,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Load artifacts and build state; any artifact problem is fatal
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let artifacts = ModelArtifacts::load(&config.artifacts)?;
        let pipeline = InferencePipeline::new(Arc::new(artifacts), config.classes)?;
        Ok(Self::new(
            pipeline,
            Validator::new(config.validation.clone()),
            config.reports.clone(),
        ))
    }

    /// Attach the Prometheus handle served at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub classifier: String,
    pub classes: Vec<i64>,
    pub feature_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/form", get(routes::form::get_form))
        .route("/api/v1/predictions", post(routes::predictions::create_prediction))
        .route("/api/v1/reports/leaderboard", get(routes::reports::get_leaderboard))
        .route("/api/v1/reports/charts", get(routes::reports::list_charts))
        .route("/api/v1/reports/charts/:name", get(routes::reports::get_chart))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let artifacts = state.pipeline.artifacts();
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            classifier: artifacts.classifier().name().to_string(),
            classes: artifacts.classifier().classes().to_vec(),
            feature_count: artifacts.columns().len(),
        },
    };

    Json(response)
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or_else(|| ApiError::NotFound("Metrics exporter is not installed".to_string()))
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    if !config.level.eq_ignore_ascii_case(level.as_str()) {
        warn!("Unknown log level {:?}, using {}", config.level, level);
    }
    Ok(())
}

/// Run the server
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    let state = AppState::from_config(&config).context("Failed to load model artifacts")?;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;
    let app = create_router(Arc::new(state.with_metrics(handle)));

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
