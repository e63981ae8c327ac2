//! Rule-based emotion estimation from drawing features

use feature_engine::FeatureVector;
use tracing::debug;

use crate::distribution::EmotionDistribution;
use crate::emotion::Emotion;

/// Stroke thickness (px) at which anger saturates
pub const STROKE_SATURATION: f64 = 5.0;
/// Colorfulness at which joy saturates
pub const COLOR_SATURATION: f64 = 50.0;
/// Perimeter pixels per unit of complexity
pub const COMPLEXITY_SCALE: f64 = 100.0;
/// Complexity units at which sadness reaches zero
pub const COMPLEXITY_CEILING: f64 = 5.0;
/// Fixed neutral weight before normalization
pub const NEUTRAL_BASELINE: f64 = 0.2;

/// Deterministic feature-to-emotion mapping
///
/// Thicker strokes read as anger, more color as joy, and simpler shapes as
/// sadness. Disgust, fear and surprise are never produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionEstimator;

impl EmotionEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Raw bucket weights before normalization
    pub fn score(&self, features: &FeatureVector) -> EmotionDistribution {
        let mut scores = EmotionDistribution::default();
        scores.set(Emotion::Enojo, unit(features.stroke_thickness / STROKE_SATURATION));
        scores.set(Emotion::Alegria, unit(features.colorfulness / COLOR_SATURATION));
        scores.set(
            Emotion::Tristeza,
            unit((COMPLEXITY_CEILING - features.shape_complexity / COMPLEXITY_SCALE) / COMPLEXITY_CEILING),
        );
        scores.set(Emotion::Neutral, NEUTRAL_BASELINE);
        scores
    }

    /// Normalized emotion distribution
    pub fn estimate(&self, features: &FeatureVector) -> EmotionDistribution {
        let emotions = self.score(features).normalized();
        debug!("Estimated emotions: {:?}", emotions);
        emotions
    }
}

/// Clamp to [0, 1], mapping NaN to 0
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Estimate a normalized emotion distribution from features
pub fn estimate_emotions(features: &FeatureVector) -> EmotionDistribution {
    EmotionEstimator.estimate(features)
}

/// Highest-weighted label, ties resolved in canonical order
pub fn dominant_emotion(distribution: &EmotionDistribution) -> Emotion {
    let dominant = distribution.dominant();
    debug!("Dominant emotion: {}", dominant);
    dominant
}
