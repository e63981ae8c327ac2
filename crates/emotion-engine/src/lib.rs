//! Emotion Engine
//!
//! Maps drawings to a fixed 7-way emotion distribution. The deterministic
//! feature heuristic is the default classifier; pretrained models plug in
//! through the same [`EmotionClassifier`] capability and are normalized by
//! the [`PredictionAdapter`].

mod adapter;
mod classifier;
mod distribution;
mod emotion;
mod estimator;
mod fallback;
mod onnx;

pub use adapter::{LabelScore, PredictionAdapter};
pub use classifier::{Classification, EmotionClassifier, HeuristicClassifier};
pub use distribution::EmotionDistribution;
pub use emotion::Emotion;
pub use estimator::{dominant_emotion, estimate_emotions, EmotionEstimator};
pub use fallback::FallbackClassifier;
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors during emotion classification
#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Unknown emotion label: {0}")]
    UnknownLabel(String),
    #[error("Prediction contained no recognizable emotion labels")]
    EmptyPrediction,
}
