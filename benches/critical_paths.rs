//! Criterion benchmarks for scalecmp critical paths
//!
//! Benchmarks the per-algorithm scaling cost:
//! - Baseline: linear resize at several sizes
//! - Edge detection: DDT edge map classification and smoothing
//! - Scalers: every registered scaler at 2x and 3x

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::Rgb;
use scalecmp::raster::Image;
use scalecmp::registry::ScalerRegistry;
use scalecmp::scalers::{scale_linear, DdtScaler};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a square image with diagonal stripes and a gradient
fn make_image(size: u32) -> Image {
    let mut img = Image::new(size, size);
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let stripe = if (x + y) / 4 % 2 == 0 { 220 } else { 30 };
            let ramp = ((x * 255) / size as i32) as u8;
            img.set_pixel(x, y, Rgb([stripe, ramp, 255 - ramp]));
        }
    }
    img
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");

    for size in [16u32, 64, 128].iter() {
        let img = make_image(*size);
        group.throughput(Throughput::Elements((*size * *size * 4) as u64));
        group.bench_with_input(BenchmarkId::new("upscale_2x", size), &img, |b, img| {
            b.iter(|| scale_linear(black_box(img), size * 2, size * 2))
        });
    }

    group.finish();
}

fn bench_edge_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("ddt_edge_map");
    let img = make_image(128);

    group.bench_function("smoothed_128", |b| {
        b.iter(|| DdtScaler::new(true).edge_map(black_box(&img)))
    });
    group.bench_function("raw_128", |b| {
        b.iter(|| DdtScaler::new(false).edge_map(black_box(&img)))
    });

    group.finish();
}

fn bench_scalers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalers");
    group.sample_size(20);

    let registry = ScalerRegistry::new();
    let img = make_image(48);

    for factor in [2u32, 3].iter() {
        let (w, h) = (48 * factor, 48 * factor);
        for &kind in registry.kinds() {
            let scaler = registry.new_scaler(kind);
            let id = BenchmarkId::new(registry.name(kind), format!("{}x", factor));
            group.bench_with_input(id, &img, |b, img| b.iter(|| scaler.scale(black_box(img), w, h)));
        }
    }

    group.finish();
}

criterion_group!(benches, bench_linear, bench_edge_map, bench_scalers);
criterion_main!(benches);
