//! Feature Vector Assembly

use drawing_image::DrawingImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::colorfulness;
use crate::contour::shape_complexity;
use crate::stroke::stroke_thickness;

/// Visual features of a drawing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mean non-edge distance to the nearest edge (pixels)
    pub stroke_thickness: f64,
    /// Sum of a*/b* chroma standard deviations
    pub colorfulness: f64,
    /// Summed perimeter of external contours (pixels)
    pub shape_complexity: f64,
}

impl FeatureVector {
    pub fn new(stroke_thickness: f64, colorfulness: f64, shape_complexity: f64) -> Self {
        Self {
            stroke_thickness,
            colorfulness,
            shape_complexity,
        }
    }
}

/// Extraction thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Canny hysteresis low threshold
    pub canny_low: f32,
    /// Canny hysteresis high threshold
    pub canny_high: f32,
    /// Grayscale level at or below which a pixel counts as stroke
    pub binarize_threshold: u8,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            binarize_threshold: 127,
        }
    }
}

/// Feature extractor for decoded drawings
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Extract all three features from an image
    pub fn extract(&self, image: &DrawingImage) -> FeatureVector {
        debug!(
            "Extracting features: {}x{}x{}",
            image.width(),
            image.height(),
            image.channels()
        );

        let gray = image.to_grayscale();

        FeatureVector {
            stroke_thickness: finite_or_zero(
                "stroke_thickness",
                stroke_thickness(&gray, self.config.canny_low, self.config.canny_high),
            ),
            colorfulness: finite_or_zero("colorfulness", colorfulness(image)),
            shape_complexity: finite_or_zero(
                "shape_complexity",
                shape_complexity(&gray, self.config.binarize_threshold),
            ),
        }
    }
}

/// Extract features with the default thresholds
pub fn extract_features(image: &DrawingImage) -> FeatureVector {
    FeatureExtractor::default().extract(image)
}

fn finite_or_zero(name: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!("Degenerate {} ({}), using 0.0", name, value);
        0.0
    }
}
