//! Adapter from external classifier outputs to the fixed distribution

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::distribution::EmotionDistribution;
use crate::emotion::Emotion;
use crate::EmotionError;

/// One (label, score) entry as produced by image-classification pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Normalizes heterogeneous model outputs into an [`EmotionDistribution`]
///
/// Labels may be Spanish or English names, `LABEL_<n>` or bare class
/// indices. Indices resolve through `class_labels`, the model's output order.
#[derive(Debug, Clone)]
pub struct PredictionAdapter {
    class_labels: Vec<Emotion>,
}

impl Default for PredictionAdapter {
    fn default() -> Self {
        Self {
            class_labels: Emotion::ALL.to_vec(),
        }
    }
}

impl PredictionAdapter {
    /// Create an adapter for a model with the given output class order
    pub fn new(class_labels: Vec<Emotion>) -> Self {
        Self { class_labels }
    }

    /// Create an adapter from configured label names
    pub fn from_label_names<S: AsRef<str>>(names: &[S]) -> Result<Self, EmotionError> {
        let class_labels = names
            .iter()
            .map(|name| name.as_ref().parse::<Emotion>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(class_labels))
    }

    pub fn class_labels(&self) -> &[Emotion] {
        &self.class_labels
    }

    /// Resolve an external label to an emotion
    pub fn resolve(&self, label: &str) -> Option<Emotion> {
        if let Some(emotion) = Emotion::from_label(label) {
            return Some(emotion);
        }

        let trimmed = label.trim();
        let index = trimmed
            .strip_prefix("LABEL_")
            .or_else(|| trimmed.strip_prefix("label_"))
            .unwrap_or(trimmed);

        index
            .parse::<usize>()
            .ok()
            .and_then(|i| self.class_labels.get(i).copied())
    }

    /// Fold (label, score) pairs into a normalized distribution
    ///
    /// Unknown labels are dropped; scores of repeated labels add up; negative
    /// or non-finite scores count as zero.
    pub fn from_label_scores(&self, predictions: &[LabelScore]) -> Result<EmotionDistribution, EmotionError> {
        let mut distribution = EmotionDistribution::default();
        let mut mapped = 0usize;

        for prediction in predictions {
            match self.resolve(&prediction.label) {
                Some(emotion) => {
                    let score = sanitize(prediction.score);
                    distribution.set(emotion, distribution.get(emotion) + score);
                    mapped += 1;
                }
                None => warn!("Dropping unrecognized label from classifier: {}", prediction.label),
            }
        }

        if mapped == 0 {
            return Err(EmotionError::EmptyPrediction);
        }

        debug!("Adapted {} of {} predictions", mapped, predictions.len());
        Ok(distribution.normalized())
    }

    /// Softmax raw class logits in model output order
    pub fn from_logits(&self, logits: &[f32]) -> Result<EmotionDistribution, EmotionError> {
        if logits.len() != self.class_labels.len() {
            return Err(EmotionError::InvalidInputShape {
                expected: format!("{} logits", self.class_labels.len()),
                actual: format!("{} logits", logits.len()),
            });
        }

        let max = logits
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f32::NEG_INFINITY, f32::max);
        if !max.is_finite() {
            return Err(EmotionError::EmptyPrediction);
        }

        let mut distribution = EmotionDistribution::default();
        for (&logit, &emotion) in logits.iter().zip(self.class_labels.iter()) {
            let weight = if logit.is_finite() {
                ((logit - max) as f64).exp()
            } else {
                0.0
            };
            distribution.set(emotion, distribution.get(emotion) + weight);
        }

        Ok(distribution.normalized())
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}
