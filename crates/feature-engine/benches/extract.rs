//! Feature extraction benchmark on a synthetic 512x512 drawing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drawing_image::DrawingImage;
use feature_engine::FeatureExtractor;

fn synthetic_drawing(size: u32) -> DrawingImage {
    let mut data = Vec::with_capacity((size * size * 3) as usize);
    for y in 0..size {
        for x in 0..size {
            let on_ring = {
                let (dx, dy) = (x as i64 - size as i64 / 2, y as i64 - size as i64 / 2);
                let r2 = dx * dx + dy * dy;
                r2 > 100 * 100 && r2 < 110 * 110
            };
            if on_ring {
                data.extend_from_slice(&[(x % 256) as u8, 40, (y % 256) as u8]);
            } else {
                data.extend_from_slice(&[250, 250, 245]);
            }
        }
    }
    DrawingImage::from_rgb(size, size, data).expect("valid synthetic drawing")
}

fn bench_extract(c: &mut Criterion) {
    let image = synthetic_drawing(512);
    let extractor = FeatureExtractor::default();

    c.bench_function("extract_features_512", |b| {
        b.iter(|| extractor.extract(black_box(&image)))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
