// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use inkstroke::StrokeBehavior;
use inkstroke::types::{
    AffineResolver, InputKind, PointerId, PointerInput, PointerType, StrokeEvent,
};
use kurbo::Point;

type Trace = Vec<(InputKind, PointerInput)>;

// `strokes` strokes of `moves` moves each, 8 ms apart, with a hand-off gap
// between strokes so every press continues the same gesture.
fn gen_handoff_trace(strokes: usize, moves: usize) -> Trace {
    let mut out = Vec::with_capacity(strokes * (moves + 2));
    let mut t = 0_u64;
    for s in 0..strokes {
        let id = PointerId(s as u64 + 1);
        let y = s as f64 * 30.0;
        let at = |x: f64, y: f64, t: u64| {
            PointerInput::new(
                id,
                PointerType::Touch,
                Point::new(x, y),
                Duration::from_millis(t),
            )
        };
        out.push((InputKind::Down, at(0.0, y, t)));
        for m in 1..=moves {
            t += 8;
            let x = m as f64 * 3.0;
            out.push((InputKind::Move, at(x, y + (x * 0.05).sin() * 10.0, t)));
        }
        t += 8;
        out.push((InputKind::Up, at(moves as f64 * 3.0, y, t)));
        t += 200;
    }
    out
}

// Several pointers drawing at once, interleaved.
fn gen_concurrent_trace(pointers: usize, moves: usize) -> Trace {
    let mut out = Vec::with_capacity(pointers * (moves + 2));
    let at = |id: usize, x: f64, t: u64| {
        PointerInput::new(
            PointerId(id as u64),
            PointerType::Pen,
            Point::new(x, id as f64 * 50.0),
            Duration::from_millis(t),
        )
    };
    for p in 0..pointers {
        out.push((InputKind::Down, at(p, 0.0, 0)));
    }
    for m in 1..=moves {
        for p in 0..pointers {
            out.push((InputKind::Move, at(p, m as f64 * 2.0, m as u64 * 17)));
        }
    }
    for p in 0..pointers {
        out.push((
            InputKind::Up,
            at(p, moves as f64 * 2.0, moves as u64 * 17 + 5),
        ));
    }
    out
}

fn replay(trace: &Trace) -> usize {
    let mut engine: StrokeBehavior<(), AffineResolver> = StrokeBehavior::new(AffineResolver);
    engine
        .on("end.bench", |e: &StrokeEvent<'_>, _: &()| {
            black_box(e.simplified_stroke);
        })
        .unwrap();
    let mut emitted = 0;
    for (kind, input) in trace {
        if let Ok(true) = engine.handle(*kind, input, &()) {
            emitted += 1;
        }
    }
    emitted + engine.advance(Duration::MAX)
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_replay");
    for &(strokes, moves) in &[(4usize, 64usize), (16, 256)] {
        let trace = gen_handoff_trace(strokes, moves);
        group.throughput(Throughput::Elements(trace.len() as u64));
        group.bench_function(format!("handoff_s{}_m{}", strokes, moves), |b| {
            b.iter_batched(
                || trace.clone(),
                |t| black_box(replay(&t)),
                BatchSize::SmallInput,
            );
        });
    }
    for &pointers in &[2usize, 10] {
        let trace = gen_concurrent_trace(pointers, 256);
        group.throughput(Throughput::Elements(trace.len() as u64));
        group.bench_function(format!("concurrent_p{}", pointers), |b| {
            b.iter(|| black_box(replay(black_box(&trace))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
