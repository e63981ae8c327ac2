//! Drawing Image Library
//!
//! Owns the decoded raster that every analysis stage consumes:
//! - Validated construction from raw RGB or grayscale buffers
//! - Decoding of uploaded JPEG/PNG bytes
//! - BT.601 grayscale conversion

pub mod decode;
pub mod raster;

pub use decode::{decode, UploadFormat};
pub use raster::DrawingImage;

use thiserror::Error;

/// Image error types
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}
