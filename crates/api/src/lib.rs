//! Drawing Emotion API Server
//!
//! HTTP service that accepts a drawing upload and returns its visual
//! features, an emotion distribution and a short piece of advice.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
mod routes;

use advice::AdviceTable;
use emotion_engine::{
    EmotionClassifier, FallbackClassifier, HeuristicClassifier, OnnxClassifier, PredictionAdapter,
};

pub use config::{LogFormat, ModelConfig, ServiceConfig};
pub use error::{ApiError, SetupError};
pub use routes::analyze::{AnalysisData, AnalysisResponse, UPLOAD_FIELD};

/// Application state shared across handlers
pub struct AppState {
    /// Classifier used for every upload
    pub classifier: Arc<dyn EmotionClassifier>,
    /// Advice lookup
    pub advice: AdviceTable,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Upload body limit in bytes
    pub max_upload_bytes: usize,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(classifier: Arc<dyn EmotionClassifier>, advice: AdviceTable, max_upload_bytes: usize) -> Self {
        Self {
            classifier,
            advice,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            max_upload_bytes,
            metrics: None,
        }
    }

    /// Build classifier and advice table from configuration
    ///
    /// A configured model that fails to load is a startup error; inference
    /// failures at request time fall back to the feature heuristic.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, SetupError> {
        let heuristic = HeuristicClassifier::new(config.features);

        let classifier: Arc<dyn EmotionClassifier> = match &config.model.path {
            Some(path) => {
                let adapter = if config.model.labels.is_empty() {
                    PredictionAdapter::default()
                } else {
                    PredictionAdapter::from_label_names(&config.model.labels)?
                };
                let onnx = OnnxClassifier::load(path, config.model.input_size, adapter)?;
                Arc::new(FallbackClassifier::new(Arc::new(onnx), heuristic))
            }
            None => Arc::new(heuristic),
        };
        info!("Using classifier: {}", classifier.name());

        let advice = AdviceTable::from_config(&config.advice)?;
        Ok(Self::new(classifier, advice, config.max_upload_bytes))
    }

    /// Attach a Prometheus handle for the `/metrics` route
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub classifier: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/analyze-drawing", post(routes::analyze::analyze_drawing))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Drawing Emotion Analysis Service alive".to_string(),
    })
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.classifier.is_loaded(),
        classifier: state.classifier.name().to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Initialize logging
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), SetupError> {
    let level = Level::from_str(level).map_err(|_| SetupError::LogLevel(level.to_string()))?;

    let result = match format {
        LogFormat::Text => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .json()
                .with_max_level(level)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    result.map_err(|e| SetupError::Logging(e.to_string()))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, SetupError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| SetupError::Metrics(e.to_string()))
}

/// Run the server until Ctrl-C
pub async fn run_server(addr: &str, state: Arc<AppState>) -> Result<(), SetupError> {
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_heuristic() {
        let state = AppState::from_config(&ServiceConfig::default()).unwrap();
        assert_eq!(state.classifier.name(), HeuristicClassifier::NAME);
        assert!(state.classifier.is_loaded());
        assert!(state.metrics.is_none());
    }

    #[test]
    fn test_missing_model_is_startup_error() {
        let mut config = ServiceConfig::default();
        config.model.path = Some("/nonexistent/emotion.onnx".to_string());
        assert!(matches!(
            AppState::from_config(&config),
            Err(SetupError::Classifier(_))
        ));
    }

    #[test]
    fn test_bad_advice_override_is_startup_error() {
        let mut config = ServiceConfig::default();
        config
            .advice
            .overrides
            .insert("boredom".to_string(), "Dibuja algo".to_string());
        assert!(matches!(
            AppState::from_config(&config),
            Err(SetupError::Advice(_))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(matches!(
            init_logging("loud", LogFormat::Text),
            Err(SetupError::LogLevel(_))
        ));
    }
}
