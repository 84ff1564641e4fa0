// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simplification basics.
//!
//! Simplifies a few hand-made strokes at different tolerance floors and prints
//! what survives.
//!
//! Run:
//! - `cargo run -p inkstroke_demos --example simplify_basics`

use inkstroke_simplify::{Segment, SimplifyStats, Tolerance, path_length, simplify_segments};
use kurbo::Point;

fn line_then_corner() -> Segment {
    let mut s: Segment = (0..=20).map(|i| Point::new(i as f64 * 5.0, 0.0)).collect();
    s.extend((1..=20).map(|i| Point::new(100.0, i as f64 * 5.0)));
    s
}

fn wobbly_line() -> Segment {
    (0..=40)
        .map(|i| {
            let x = i as f64 * 5.0;
            let y = if i % 2 == 0 { 1.5 } else { -1.5 };
            Point::new(x, y)
        })
        .collect()
}

fn arc() -> Segment {
    (0..=32)
        .map(|i| {
            let t = i as f64 / 32.0 * core::f64::consts::PI;
            Point::new(80.0 * t.cos(), 80.0 * t.sin())
        })
        .collect()
}

fn main() {
    let strokes = vec![line_then_corner(), wobbly_line(), arc()];
    let names = ["corner", "wobble", "arc"];

    for floor in [1.0, 5.0, 15.0] {
        let tolerance = Tolerance::with_floor(floor);
        let out = simplify_segments(&strokes, tolerance);
        let stats = SimplifyStats::measure(&strokes, &out);
        println!(
            "== floor {floor} ({} -> {} points, {:.0}% removed) ==",
            stats.input_points,
            stats.output_points,
            stats.reduction() * 100.0
        );
        for ((name, before), after) in names.iter().zip(&strokes).zip(&out) {
            println!(
                "  {name:>6}: {:>2} -> {:>2} points, length {:.1} -> {:.1}",
                before.len(),
                after.len(),
                path_length(before),
                path_length(after)
            );
        }
    }
}
