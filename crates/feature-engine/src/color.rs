//! Colorfulness from chroma channel dispersion

use drawing_image::DrawingImage;
use palette::{IntoColor, Lab, Srgb};
use tracing::debug;

use crate::statistics::ChannelStats;

/// Convert an sRGB pixel to 8-bit L*a*b* (L*255/100, a+128, b+128)
pub fn lab8(rgb: [u8; 3]) -> [u8; 3] {
    let lab: Lab = Srgb::new(rgb[0], rgb[1], rgb[2])
        .into_format::<f32>()
        .into_color();

    [
        quantize(lab.l * 255.0 / 100.0),
        quantize(lab.a + 128.0),
        quantize(lab.b + 128.0),
    ]
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Sum of the a* and b* channel standard deviations
///
/// Grayscale rasters carry no chroma and return 0.0 directly.
pub fn colorfulness(image: &DrawingImage) -> f64 {
    if !image.is_color() {
        debug!("Colorfulness of grayscale image: 0.0");
        return 0.0;
    }

    let rgb = image.to_rgb();
    let pixel_count = rgb.width() as usize * rgb.height() as usize;
    let mut a_channel = Vec::with_capacity(pixel_count);
    let mut b_channel = Vec::with_capacity(pixel_count);

    for pixel in rgb.pixels() {
        let [_, a, b] = lab8(pixel.0);
        a_channel.push(a as f64);
        b_channel.push(b as f64);
    }

    let a_stats = ChannelStats::of(&a_channel);
    let b_stats = ChannelStats::of(&b_channel);
    let colorfulness = a_stats.std_dev + b_stats.std_dev;

    debug!("Colorfulness calculated: {}", colorfulness);
    colorfulness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab8_achromatic() {
        for v in [0u8, 64, 128, 200, 255] {
            let [_, a, b] = lab8([v, v, v]);
            assert_eq!(a, 128);
            assert_eq!(b, 128);
        }
        assert_eq!(lab8([255, 255, 255])[0], 255);
        assert_eq!(lab8([0, 0, 0])[0], 0);
    }

    #[test]
    fn test_lab8_red_is_warm() {
        let [_, a, b] = lab8([255, 0, 0]);
        // Pure red: a* ~ +80, b* ~ +67
        assert!(a > 200);
        assert!(b > 180);
    }

    #[test]
    fn test_grayscale_image_has_no_color() {
        let img = DrawingImage::from_gray(4, 4, vec![90; 16]).unwrap();
        assert_eq!(colorfulness(&img), 0.0);
    }

    #[test]
    fn test_uniform_color_has_no_dispersion() {
        let img = DrawingImage::from_rgb(4, 4, [30u8, 140, 220].repeat(16)).unwrap();
        assert_eq!(colorfulness(&img), 0.0);
    }

    #[test]
    fn test_red_and_blue_halves() {
        let mut data = Vec::new();
        for i in 0..64 {
            if i % 2 == 0 {
                data.extend_from_slice(&[255, 0, 0]);
            } else {
                data.extend_from_slice(&[0, 0, 255]);
            }
        }
        let img = DrawingImage::from_rgb(8, 8, data).unwrap();
        let value = colorfulness(&img);
        assert!(value > 50.0, "colorfulness was {}", value);
    }
}
