//! Classifier capability and the feature heuristic

use drawing_image::DrawingImage;
use feature_engine::{FeatureConfig, FeatureExtractor, FeatureVector};
use serde::Serialize;
use tracing::debug;

use crate::distribution::EmotionDistribution;
use crate::emotion::Emotion;
use crate::estimator::EmotionEstimator;
use crate::EmotionError;

/// Result of classifying one drawing
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// Visual features, when the classifier computed them
    pub features: Option<FeatureVector>,
    /// Normalized emotion distribution
    pub emotions: EmotionDistribution,
    /// Highest-weighted label
    pub dominant_emotion: Emotion,
    /// Name of the classifier that produced the result
    pub classifier: String,
    /// Whether the rule-based fallback replaced a failed model
    pub used_fallback: bool,
}

impl Classification {
    pub fn new(classifier: &str, features: Option<FeatureVector>, emotions: EmotionDistribution) -> Self {
        Self {
            features,
            dominant_emotion: emotions.dominant(),
            emotions,
            classifier: classifier.to_string(),
            used_fallback: false,
        }
    }
}

/// A capability that turns a decoded drawing into emotions
///
/// Implementations are shared across request handlers, so they hold no
/// per-request state.
pub trait EmotionClassifier: Send + Sync {
    /// Short identifier reported in responses
    fn name(&self) -> &str;

    /// Whether the backing model is ready
    fn is_loaded(&self) -> bool {
        true
    }

    fn classify(&self, image: &DrawingImage) -> Result<Classification, EmotionError>;
}

/// Feature extraction followed by the deterministic estimator
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    extractor: FeatureExtractor,
    estimator: EmotionEstimator,
}

impl HeuristicClassifier {
    pub const NAME: &'static str = "feature-heuristic";

    pub fn new(config: FeatureConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config),
            estimator: EmotionEstimator::new(),
        }
    }
}

impl EmotionClassifier for HeuristicClassifier {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn classify(&self, image: &DrawingImage) -> Result<Classification, EmotionError> {
        let features = self.extractor.extract(image);
        let emotions = self.estimator.estimate(&features);
        let classification = Classification::new(Self::NAME, Some(features), emotions);
        debug!(
            "Heuristic classification: {} ({:?})",
            classification.dominant_emotion, features
        );
        Ok(classification)
    }
}
