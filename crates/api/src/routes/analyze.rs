//! Drawing analysis route

use axum::{
    extract::{Multipart, State},
    Json,
};
use drawing_image::{decode, UploadFormat};
use emotion_engine::{Classification, Emotion, EmotionDistribution};
use feature_engine::FeatureVector;
use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

/// Multipart field carrying the drawing
pub const UPLOAD_FIELD: &str = "file";

/// Analysis payload
#[derive(Debug, Serialize)]
pub struct AnalysisData {
    pub features: Option<FeatureVector>,
    pub emotions: EmotionDistribution,
    pub dominant_emotion: Emotion,
    pub emotional_advice: String,
    pub classifier: String,
    pub used_fallback: bool,
}

/// Response for the analysis endpoint
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: AnalysisData,
}

struct Upload {
    format: UploadFormat,
    bytes: Vec<u8>,
}

/// Analyze an uploaded drawing
pub async fn analyze_drawing(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let start = Instant::now();

    let result = run_analysis(&state, multipart).await;
    histogram!("drawing_analysis_seconds").record(start.elapsed().as_secs_f64());

    match result {
        Ok(classification) => {
            counter!(
                "drawings_analyzed_total",
                "dominant_emotion" => classification.dominant_emotion.as_str()
            )
            .increment(1);
            if classification.used_fallback {
                counter!("classifier_fallback_total").increment(1);
            }

            info!(
                "Drawing analyzed: {} via {} in {}ms",
                classification.dominant_emotion,
                classification.classifier,
                start.elapsed().as_millis()
            );

            let emotional_advice = state.advice.compose(classification.dominant_emotion);
            Ok(Json(AnalysisResponse {
                success: true,
                data: AnalysisData {
                    features: classification.features,
                    emotions: classification.emotions,
                    dominant_emotion: classification.dominant_emotion,
                    emotional_advice,
                    classifier: classification.classifier,
                    used_fallback: classification.used_fallback,
                },
            }))
        }
        Err(e) => {
            counter!("drawing_analysis_failures_total").increment(1);
            Err(e)
        }
    }
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<Classification, ApiError> {
    let upload = read_upload(multipart).await?;
    debug!("Received {} upload ({} bytes)", upload.format.as_str(), upload.bytes.len());

    // Decoding and pixel work are CPU-bound
    let classifier = Arc::clone(&state.classifier);
    tokio::task::spawn_blocking(move || -> Result<Classification, ApiError> {
        let image = decode(&upload.bytes, upload.format)?;
        Ok(classifier.classify(&image)?)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {}", e)))?
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let format = UploadFormat::from_content_type(field.content_type().unwrap_or_default())?;
        let bytes = field.bytes().await?;
        return Ok(Upload {
            format,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::MissingFile)
}
