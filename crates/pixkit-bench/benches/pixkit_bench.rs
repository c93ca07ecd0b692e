//! Benchmarks for the pixel engines.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use pixkit_color::{hsl_to_rgb, rgb_to_hsl, Adjustment};
use pixkit_core::{PixelBuffer, Point, Rgb};
use pixkit_ops::{adjust, flood_fill, pixelate, BlockSize};

/// Noisy test image so every block and pixel does real work.
fn noise(size: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(size, size);
    let mut state = 0x2545_f491u32;
    for b in buf.as_raw_mut() {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *b = (state >> 24) as u8;
    }
    buf
}

/// Benchmark flood fill over a uniform canvas (worst case: whole image).
fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for size in [64u32, 256, 1024] {
        let canvas = PixelBuffer::new(size, size);
        group.throughput(Throughput::Elements(size as u64 * size as u64));

        group.bench_with_input(BenchmarkId::new("whole_canvas", size), &canvas, |b, src| {
            b.iter(|| {
                let mut buf = src.clone();
                flood_fill(&mut buf, Point::new(0, 0), black_box(Rgb::WHITE)).unwrap();
                buf
            })
        });
    }

    group.finish();
}

/// Benchmark pixelate at several block sizes.
fn bench_pixelate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixelate");
    let src = noise(1024);
    group.throughput(Throughput::Elements(1024 * 1024));

    for block in [2.0, 8.0, 32.0] {
        group.bench_with_input(BenchmarkId::new("1024", block), &block, |b, &block| {
            b.iter(|| {
                let mut buf = src.clone();
                pixelate(&mut buf, BlockSize::square(black_box(block))).unwrap();
                buf
            })
        });
    }

    group.finish();
}

/// Benchmark HSL adjustments.
fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjust");
    let src = noise(1024);
    group.throughput(Throughput::Elements(1024 * 1024));

    group.bench_function("lightness_1024", |b| {
        b.iter(|| {
            let mut buf = src.clone();
            adjust(&mut buf, Adjustment::lightness(black_box(0.1))).unwrap();
            buf
        })
    });

    group.bench_function("saturation_1024", |b| {
        b.iter(|| {
            let mut buf = src.clone();
            adjust(&mut buf, Adjustment::saturation(black_box(-0.2))).unwrap();
            buf
        })
    });

    group.finish();
}

/// Benchmark a single RGB -> HSL -> RGB round trip.
fn bench_hsl(c: &mut Criterion) {
    let px = Rgb::new(200, 120, 40);
    c.bench_function("hsl_round_trip", |b| {
        b.iter(|| hsl_to_rgb(rgb_to_hsl(black_box(px))))
    });
}

criterion_group!(benches, bench_flood_fill, bench_pixelate, bench_adjust, bench_hsl);
criterion_main!(benches);
