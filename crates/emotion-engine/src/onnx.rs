//! Pretrained ONNX image classifier

use drawing_image::DrawingImage;
use tract_onnx::prelude::*;
use tracing::{debug, info};

use crate::adapter::PredictionAdapter;
use crate::classifier::{Classification, EmotionClassifier};
use crate::EmotionError;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Image classifier backed by an ONNX model (tract)
///
/// Input is a 1x3xNxN f32 tensor scaled to [0, 1]; the first output is read
/// as one logit per class in the adapter's class order.
pub struct OnnxClassifier {
    model_path: String,
    input_size: u32,
    adapter: PredictionAdapter,
    plan: OnnxPlan,
}

impl OnnxClassifier {
    pub const NAME: &'static str = "onnx";

    /// Load and optimize the ONNX model
    pub fn load(model_path: &str, input_size: u32, adapter: PredictionAdapter) -> Result<Self, EmotionError> {
        let classes: Vec<&str> = adapter.class_labels().iter().map(|e| e.english()).collect();
        info!(
            "Loading emotion model from {} (input {}x{}, classes {:?})",
            model_path, input_size, input_size, classes
        );

        if input_size == 0 {
            return Err(EmotionError::ModelLoadError("input size must be positive".into()));
        }

        let plan = build_plan(model_path, input_size as usize)
            .map_err(|e| EmotionError::ModelLoadError(e.to_string()))?;

        info!("Model loaded successfully");
        Ok(Self {
            model_path: model_path.to_string(),
            input_size,
            adapter,
            plan,
        })
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    fn input_tensor(&self, image: &DrawingImage) -> Tensor {
        let resized = image.resize_square(self.input_size);
        let size = self.input_size as usize;
        tract_ndarray::Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
            resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
        })
        .into()
    }
}

fn build_plan(model_path: &str, size: usize) -> TractResult<OnnxPlan> {
    tract_onnx::onnx()
        .model_for_path(model_path)?
        .with_input_fact(0, f32::fact([1, 3, size, size]).into())?
        .into_optimized()?
        .into_runnable()
}

impl EmotionClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn classify(&self, image: &DrawingImage) -> Result<Classification, EmotionError> {
        let start = std::time::Instant::now();
        let input = self.input_tensor(image);

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| EmotionError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| EmotionError::InferenceFailed("model produced no outputs".into()))?;
        let logits: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| EmotionError::InferenceFailed(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let emotions = self.adapter.from_logits(&logits)?;
        debug!(
            "Inference with {} completed in {}ms",
            self.model_path(),
            start.elapsed().as_millis()
        );

        Ok(Classification::new(Self::NAME, None, emotions))
    }
}
