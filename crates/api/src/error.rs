//! API and startup errors

use advice::AdviceError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drawing_image::ImageError;
use emotion_engine::EmotionError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid file type. Only JPEG and PNG allowed.")]
    InvalidFileType,

    #[error("Could not decode image.")]
    UndecodableImage,

    #[error("Missing 'file' field in multipart upload.")]
    MissingFile,

    #[error("{message}")]
    Multipart { status: StatusCode, message: String },

    #[error("Internal error. Please try again later.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileType | ApiError::UndecodableImage | ApiError::MissingFile => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Multipart { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnsupportedFormat(_) => ApiError::InvalidFileType,
            other => {
                warn!("Rejected upload: {}", other);
                ApiError::UndecodableImage
            }
        }
    }
}

impl From<EmotionError> for ApiError {
    fn from(err: EmotionError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            // Detail stays in the logs, clients get the generic message
            error!("Drawing analysis failed: {}", detail);
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Errors while bringing the service up
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid log level: {0}")]
    LogLevel(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Logging(String),

    #[error("Classifier setup failed: {0}")]
    Classifier(#[from] EmotionError),

    #[error("Advice setup failed: {0}")]
    Advice(#[from] AdviceError),

    #[error("Metrics setup failed: {0}")]
    Metrics(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_errors_map_to_client_errors() {
        let err: ApiError = ImageError::UnsupportedFormat("image/gif".into()).into();
        assert!(matches!(err, ApiError::InvalidFileType));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ImageError::InvalidImage("empty upload".into()).into();
        assert!(matches!(err, ApiError::UndecodableImage));
        assert_eq!(err.to_string(), "Could not decode image.");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err: ApiError = EmotionError::InferenceFailed("tensor shape".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal error. Please try again later.");
    }
}
