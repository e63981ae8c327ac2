//! Feature Engineering Engine
//!
//! Derives scalar visual features from a decoded drawing:
//! - Stroke thickness (Canny edges + 5x5 chamfer distance transform)
//! - Colorfulness (L*a*b* chroma dispersion)
//! - Shape complexity (external contour perimeter)

mod color;
mod contour;
mod features;
mod statistics;
mod stroke;

pub use color::{colorfulness, lab8};
pub use contour::{binarize_inverted, compress_chain, external_contours, shape_complexity};
pub use features::{extract_features, FeatureConfig, FeatureExtractor, FeatureVector};
pub use statistics::ChannelStats;
pub use stroke::{chamfer_distance_5x5, stroke_thickness};
