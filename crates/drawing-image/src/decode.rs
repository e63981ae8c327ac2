//! Upload decoding

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::raster::DrawingImage;
use crate::ImageError;

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Jpeg,
    Png,
}

impl UploadFormat {
    /// Map a MIME content type to an accepted format
    pub fn from_content_type(content_type: &str) -> Result<Self, ImageError> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "image/jpeg" => Ok(UploadFormat::Jpeg),
            "image/png" => Ok(UploadFormat::Png),
            _ => Err(ImageError::UnsupportedFormat(content_type.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFormat::Jpeg => "image/jpeg",
            UploadFormat::Png => "image/png",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            UploadFormat::Jpeg => ImageFormat::Jpeg,
            UploadFormat::Png => ImageFormat::Png,
        }
    }
}

/// Decode uploaded bytes into a drawing image
///
/// Alpha is dropped. Images without chroma decode to a single luma channel.
pub fn decode(bytes: &[u8], format: UploadFormat) -> Result<DrawingImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::InvalidImage("empty upload".into()));
    }

    let img = image::load_from_memory_with_format(bytes, format.image_format())?;
    debug!(
        "Decoded {} upload: {}x{} {:?}",
        format.as_str(),
        img.width(),
        img.height(),
        img.color()
    );

    from_dynamic(img)
}

fn from_dynamic(img: DynamicImage) -> Result<DrawingImage, ImageError> {
    if img.color().has_color() {
        DrawingImage::from_rgb_image(img.to_rgb8())
    } else {
        DrawingImage::from_gray_image(img.to_luma8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(UploadFormat::from_content_type("image/png").unwrap(), UploadFormat::Png);
        assert_eq!(UploadFormat::from_content_type("IMAGE/JPEG").unwrap(), UploadFormat::Jpeg);
        assert!(matches!(
            UploadFormat::from_content_type("image/gif"),
            Err(ImageError::UnsupportedFormat(_))
        ));
        assert!(UploadFormat::from_content_type("text/plain").is_err());
    }

    #[test]
    fn test_decode_png_color() {
        let img = RgbImage::from_pixel(6, 4, Rgb([10, 20, 30]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageFormat::Png);
        let decoded = decode(&bytes, UploadFormat::Png).unwrap();
        assert!(decoded.is_color());
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
        assert_eq!(decoded.get_pixel(0, 0), Some([10, 20, 30]));
    }

    #[test]
    fn test_decode_png_gray() {
        let img = GrayImage::from_pixel(3, 3, Luma([77]));
        let bytes = encode(DynamicImage::ImageLuma8(img), ImageFormat::Png);
        let decoded = decode(&bytes, UploadFormat::Png).unwrap();
        assert_eq!(decoded.channels(), 1);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode(b"definitely not a png", UploadFormat::Png);
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(&[], UploadFormat::Jpeg), Err(ImageError::InvalidImage(_))));
    }
}
