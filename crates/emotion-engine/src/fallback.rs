//! Rule-based fallback when a model classifier fails

use drawing_image::DrawingImage;
use std::sync::Arc;
use tracing::warn;

use crate::classifier::{Classification, EmotionClassifier, HeuristicClassifier};
use crate::EmotionError;

/// Runs a primary classifier and falls back to the feature heuristic on error
pub struct FallbackClassifier {
    primary: Arc<dyn EmotionClassifier>,
    fallback: HeuristicClassifier,
}

impl FallbackClassifier {
    pub fn new(primary: Arc<dyn EmotionClassifier>, fallback: HeuristicClassifier) -> Self {
        Self { primary, fallback }
    }
}

impl EmotionClassifier for FallbackClassifier {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn is_loaded(&self) -> bool {
        self.primary.is_loaded()
    }

    fn classify(&self, image: &DrawingImage) -> Result<Classification, EmotionError> {
        match self.primary.classify(image) {
            Ok(classification) => Ok(classification),
            Err(e) => {
                warn!(
                    "Classifier {} failed: {}. Using rule-based fallback",
                    self.primary.name(),
                    e
                );
                let mut classification = self.fallback.classify(image)?;
                classification.used_fallback = true;
                Ok(classification)
            }
        }
    }
}
