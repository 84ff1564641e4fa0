// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use inkstroke_simplify::{Segment, SimplifyStats, Tolerance, simplify_segment, simplify_segments};
use kurbo::Point;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

// Hand-drawn looking curve: a slow spiral with sensor jitter.
fn gen_jittered_spiral(n: usize, jitter: f64) -> Segment {
    let mut rng = Rng::new(0x5EED_1234_ABCD_0001);
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.02;
            let r = 20.0 + t * 15.0;
            let jx = (rng.next_f64() - 0.5) * jitter;
            let jy = (rng.next_f64() - 0.5) * jitter;
            Point::new(500.0 + r * t.cos() + jx, 500.0 + r * t.sin() + jy)
        })
        .collect()
}

fn gen_collinear(n: usize) -> Segment {
    (0..n)
        .map(|i| Point::new(i as f64, i as f64 * 0.5))
        .collect()
}

// Worst case for the split: every interior point is an extreme.
fn gen_zigzag(n: usize) -> Segment {
    (0..n)
        .map(|i| Point::new(i as f64 * 4.0, if i % 2 == 0 { 0.0 } else { 40.0 }))
        .collect()
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_segment");
    for &n in &[256usize, 1024, 4096] {
        let spiral = gen_jittered_spiral(n, 3.0);
        let line = gen_collinear(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("spiral_n{}", n), |b| {
            b.iter(|| black_box(simplify_segment(black_box(&spiral), Tolerance::default())));
        });
        group.bench_function(format!("collinear_n{}", n), |b| {
            b.iter(|| black_box(simplify_segment(black_box(&line), Tolerance::default())));
        });
    }
    let zig = gen_zigzag(2048);
    group.throughput(Throughput::Elements(zig.len() as u64));
    group.bench_function("zigzag_n2048", |b| {
        b.iter(|| black_box(simplify_segment(black_box(&zig), Tolerance::default())));
    });
    group.finish();
}

fn bench_multi_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_segments");
    let segments: Vec<Segment> = (0..16).map(|_| gen_jittered_spiral(300, 2.0)).collect();
    let total: usize = segments.iter().map(Vec::len).sum();
    group.throughput(Throughput::Elements(total as u64));
    for &floor in &[1.0_f64, 5.0, 20.0] {
        let tolerance = Tolerance::with_floor(floor);
        let out = simplify_segments(&segments, tolerance);
        let stats = SimplifyStats::measure(&segments, &out);
        println!(
            "floor {floor}: {} -> {} points ({:.1}% removed)",
            stats.input_points,
            stats.output_points,
            stats.reduction() * 100.0
        );
        group.bench_function(format!("spirals_floor{}", floor), |b| {
            b.iter_batched(
                || segments.clone(),
                |segs| black_box(simplify_segments(segs, tolerance)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_segment, bench_multi_segment);
criterion_main!(benches);
