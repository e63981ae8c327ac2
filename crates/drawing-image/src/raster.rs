//! Decoded raster types and pixel conversions

use image::{imageops, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use std::borrow::Cow;

use crate::ImageError;

/// Pixel storage of a decoded drawing
#[derive(Debug, Clone)]
enum Raster {
    /// 3 channels, 8 bits each, RGB order
    Color(RgbImage),
    /// Single 8-bit luma channel
    Gray(GrayImage),
}

/// Decoded drawing, guaranteed non-empty
#[derive(Debug, Clone)]
pub struct DrawingImage {
    raster: Raster,
}

impl DrawingImage {
    /// Create an image from packed RGB data (width * height * 3)
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        check_shape(width, height, 3, data.len())?;
        let buffer = RgbImage::from_raw(width, height, data)
            .ok_or_else(|| ImageError::InvalidImage("RGB buffer does not match dimensions".into()))?;
        Ok(Self { raster: Raster::Color(buffer) })
    }

    /// Create an image from packed luma data (width * height)
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        check_shape(width, height, 1, data.len())?;
        let buffer = GrayImage::from_raw(width, height, data)
            .ok_or_else(|| ImageError::InvalidImage("Gray buffer does not match dimensions".into()))?;
        Ok(Self { raster: Raster::Gray(buffer) })
    }

    /// Wrap an existing RGB buffer
    pub fn from_rgb_image(buffer: RgbImage) -> Result<Self, ImageError> {
        check_shape(buffer.width(), buffer.height(), 3, buffer.as_raw().len())?;
        Ok(Self { raster: Raster::Color(buffer) })
    }

    /// Wrap an existing grayscale buffer
    pub fn from_gray_image(buffer: GrayImage) -> Result<Self, ImageError> {
        check_shape(buffer.width(), buffer.height(), 1, buffer.as_raw().len())?;
        Ok(Self { raster: Raster::Gray(buffer) })
    }

    pub fn width(&self) -> u32 {
        match &self.raster {
            Raster::Color(img) => img.width(),
            Raster::Gray(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match &self.raster {
            Raster::Color(img) => img.height(),
            Raster::Gray(img) => img.height(),
        }
    }

    /// Number of channels (3 for color, 1 for grayscale)
    pub fn channels(&self) -> u8 {
        match &self.raster {
            Raster::Color(_) => 3,
            Raster::Gray(_) => 1,
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self.raster, Raster::Color(_))
    }

    /// Get RGB pixel at (x, y); grayscale pixels are replicated
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        match &self.raster {
            Raster::Color(img) => Some(img.get_pixel(x, y).0),
            Raster::Gray(img) => {
                let v = img.get_pixel(x, y).0[0];
                Some([v, v, v])
            }
        }
    }

    /// Convert to grayscale
    pub fn to_grayscale(&self) -> Cow<'_, GrayImage> {
        match &self.raster {
            Raster::Gray(img) => Cow::Borrowed(img),
            Raster::Color(img) => Cow::Owned(ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let [r, g, b] = img.get_pixel(x, y).0;
                Luma([luma(r, g, b)])
            })),
        }
    }

    /// Convert to RGB, replicating the luma channel for grayscale input
    pub fn to_rgb(&self) -> Cow<'_, RgbImage> {
        match &self.raster {
            Raster::Color(img) => Cow::Borrowed(img),
            Raster::Gray(img) => Cow::Owned(ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
                let v = img.get_pixel(x, y).0[0];
                Rgb([v, v, v])
            })),
        }
    }

    /// Resize to a square RGB buffer for model input
    pub fn resize_square(&self, size: u32) -> RgbImage {
        let rgb = self.to_rgb();
        imageops::resize(&*rgb, size, size, imageops::FilterType::Triangle)
    }
}

/// Luminance formula: 0.299*R + 0.587*G + 0.114*B, rounded
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn check_shape(width: u32, height: u32, channels: usize, len: usize) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidImage(format!(
            "empty raster ({}x{})",
            width, height
        )));
    }
    let expected = width as usize * height as usize * channels;
    if len != expected {
        return Err(ImageError::InvalidImage(format!(
            "expected {} bytes for {}x{}x{}, got {}",
            expected, width, height, channels, len
        )));
    }
    Ok(())
}
