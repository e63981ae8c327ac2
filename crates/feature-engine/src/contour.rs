//! Shape complexity from external contour perimeters

use image::{imageops, GrayImage, ImageBuffer, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::arc_length;
use imageproc::point::Point;
use tracing::debug;

/// Binarize so that pixels at or below `threshold` become foreground (255)
pub fn binarize_inverted(gray: &GrayImage, threshold: u8) -> GrayImage {
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] > threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Drop points lying inside straight runs of a closed chain, keeping corners
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());

    points
        .iter()
        .enumerate()
        .filter(|&(i, &p)| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, p) != step(p, next)
        })
        .map(|(_, &p)| p)
        .collect()
}

/// Outermost foreground contours of a binary image, compressed
///
/// Pixels outside the image count as background, so shapes touching the
/// border are traced like any other.
pub fn external_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    // find_contours never opens an outer border at column 0
    let mut padded = GrayImage::new(binary.width() + 2, binary.height() + 2);
    imageops::replace(&mut padded, binary, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point<i32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            compress_chain(&points)
        })
        .collect()
}

/// Sum of closed perimeters of the external contours of the dark strokes
pub fn shape_complexity(gray: &GrayImage, threshold: u8) -> f64 {
    let binary = binarize_inverted(gray, threshold);
    let contours = external_contours(&binary);

    let complexity = contours
        .iter()
        .fold(0.0, |total, c| total + arc_length(c, true));
    debug!(
        "Shape complexity calculated: {} ({} contours)",
        complexity,
        contours.len()
    );
    complexity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with_square(size: u32, from: u32, to: u32) -> GrayImage {
        let mut img = GrayImage::from_pixel(size, size, Luma([255]));
        for y in from..to {
            for x in from..to {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        img
    }

    #[test]
    fn test_binarize_threshold_is_inclusive() {
        let img = GrayImage::from_raw(3, 1, vec![127, 128, 0]).unwrap();
        let binary = binarize_inverted(&img, 127);
        assert_eq!(binary.as_raw(), &vec![255, 0, 255]);
    }

    #[test]
    fn test_compress_square_chain() {
        let mut chain = Vec::new();
        for x in 0..4 {
            chain.push(Point::new(x, 0));
        }
        for y in 1..4 {
            chain.push(Point::new(3, y));
        }
        for x in (0..3).rev() {
            chain.push(Point::new(x, 3));
        }
        for y in (1..3).rev() {
            chain.push(Point::new(0, y));
        }
        let compressed = compress_chain(&chain);
        assert_eq!(
            compressed,
            vec![Point::new(0, 0), Point::new(3, 0), Point::new(3, 3), Point::new(0, 3)]
        );
        assert!((arc_length(&compressed, true) - arc_length(&chain, true)).abs() < 1e-9);
    }

    #[test]
    fn test_blank_canvas_has_no_contours() {
        let img = GrayImage::from_pixel(20, 20, Luma([255]));
        let complexity = shape_complexity(&img, 127);
        assert_eq!(complexity, 0.0);
        assert!(!complexity.is_sign_negative());
    }

    #[test]
    fn test_square_on_left_edge() {
        let mut img = GrayImage::from_pixel(30, 30, Luma([255]));
        for y in 10..20 {
            for x in 0..10 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        let perimeter = shape_complexity(&img, 127);
        assert!((perimeter - 36.0).abs() < 1e-9, "perimeter was {}", perimeter);
    }

    #[test]
    fn test_square_in_corner() {
        let img = canvas_with_square(30, 0, 10);
        let contours = external_contours(&binarize_inverted(&img, 127));
        assert_eq!(contours.len(), 1);
        assert!(contours[0].contains(&Point::new(0, 0)));
        assert!((shape_complexity(&img, 127) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_fully_dark_canvas_traces_image_border() {
        let img = GrayImage::from_pixel(12, 8, Luma([0]));
        let perimeter = shape_complexity(&img, 127);
        let expected = 2.0 * 11.0 + 2.0 * 7.0;
        assert!((perimeter - expected).abs() < 1e-9, "perimeter was {}", perimeter);
    }

    #[test]
    fn test_square_perimeter() {
        // 10x10 dark square: pixel-center outline of side 9
        let img = canvas_with_square(30, 10, 20);
        let perimeter = shape_complexity(&img, 127);
        assert!((perimeter - 36.0).abs() < 1e-9, "perimeter was {}", perimeter);
    }

    #[test]
    fn test_hole_is_not_counted() {
        let mut img = canvas_with_square(40, 5, 35);
        for y in 15..25 {
            for x in 15..25 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let perimeter = shape_complexity(&img, 127);
        assert!((perimeter - 4.0 * 29.0).abs() < 1e-9, "perimeter was {}", perimeter);
    }

    #[test]
    fn test_two_shapes_add_up() {
        let mut img = GrayImage::from_pixel(50, 20, Luma([255]));
        for y in 5..10 {
            for x in 5..10 {
                img.put_pixel(x, y, Luma([0]));
            }
            for x in 30..40 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        let perimeter = shape_complexity(&img, 127);
        // 5x5 square: 4*4, 10x5 rectangle: 2*(9+4)
        assert!((perimeter - (16.0 + 26.0)).abs() < 1e-9, "perimeter was {}", perimeter);
    }
}
