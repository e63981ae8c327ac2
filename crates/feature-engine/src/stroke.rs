//! Stroke thickness from edge-distance averaging

use image::{imageops, GrayImage};
use imageproc::edges::canny;
use tracing::debug;

use crate::statistics::ChannelStats;

/// Chamfer weights for the 5x5 mask: axial, diagonal, knight move
const AXIAL: f32 = 1.0;
const DIAGONAL: f32 = 1.4;
const KNIGHT: f32 = 2.1969;

/// Causal half of the 5x5 mask (dx, dy, weight); the backward pass mirrors it
const FORWARD_MASK: [(i64, i64, f32); 8] = [
    (-1, 0, AXIAL),
    (-1, -1, DIAGONAL),
    (0, -1, AXIAL),
    (1, -1, DIAGONAL),
    (-2, -1, KNIGHT),
    (-1, -2, KNIGHT),
    (1, -2, KNIGHT),
    (2, -1, KNIGHT),
];

/// Approximate Euclidean distance from every pixel to the nearest zero pixel
///
/// Row-major output; zero pixels map to 0.0. Returns `None` when the image
/// has no zero pixel, since every distance would be unbounded.
pub fn chamfer_distance_5x5(image: &GrayImage) -> Option<Vec<f32>> {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let mut dist: Vec<f32> = image
        .as_raw()
        .iter()
        .map(|&v| if v == 0 { 0.0 } else { f32::INFINITY })
        .collect();

    if !dist.iter().any(|&d| d == 0.0) {
        return None;
    }

    for y in 0..height {
        for x in 0..width {
            relax(&mut dist, width, height, x, y, 1);
        }
    }
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            relax(&mut dist, width, height, x, y, -1);
        }
    }

    Some(dist)
}

fn relax(dist: &mut [f32], width: i64, height: i64, x: i64, y: i64, sign: i64) {
    let i = (y * width + x) as usize;
    if dist[i] == 0.0 {
        return;
    }
    let mut best = dist[i];
    for &(dx, dy, weight) in FORWARD_MASK.iter() {
        let (nx, ny) = (x + sign * dx, y + sign * dy);
        if nx >= 0 && nx < width && ny >= 0 && ny < height {
            best = best.min(dist[(ny * width + nx) as usize] + weight);
        }
    }
    dist[i] = best;
}

/// Mean distance from non-edge pixels to the nearest Canny edge
///
/// `imageproc`'s Canny smooths with a Gaussian (sigma 1.4) and thresholds an
/// L2 gradient magnitude, whereas OpenCV's default works on the raw image with
/// an L1 magnitude. The same thresholds therefore keep somewhat different
/// edges, and values differ from OpenCV-based measurements.
///
/// Falls back to 0.0 when the edge map is empty or covers every pixel.
pub fn stroke_thickness(gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> f64 {
    let mut inverted = canny(gray, low_threshold, high_threshold);
    imageops::invert(&mut inverted);

    let thickness = chamfer_distance_5x5(&inverted)
        .and_then(|dist| ChannelStats::mean_positive(&dist));

    match thickness {
        Some(value) => {
            debug!("Stroke thickness calculated: {}", value);
            value
        }
        None => {
            debug!("Stroke thickness degenerate (no edge/background split), using 0.0");
            0.0
        }
    }
}
