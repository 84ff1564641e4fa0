// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-off between touches.
//!
//! Two fingers draw one after the other. The second press lands inside the
//! completion window of the first, so it continues the same gesture and the
//! final `end` carries two simplified segments.
//!
//! Run:
//! - `cargo run -p inkstroke_demos --example stroke_handoff`

use std::error::Error;
use std::time::Duration;

use inkstroke::StrokeBehavior;
use inkstroke::types::{
    AffineResolver, InputAdapter, PointerId, PointerInput, PointerType, StrokeEvent,
};
use kurbo::{Affine, Point};

#[derive(Debug, Default)]
struct PrintAdapter;

impl InputAdapter for PrintAdapter {
    fn track(&mut self, pointer: PointerId) {
        println!("  [adapter] track {}", pointer.0);
    }
    fn release(&mut self, pointer: PointerId) {
        println!("  [adapter] release {}", pointer.0);
    }
    fn suppress_native_scroll(&mut self, pointer: PointerId) {
        println!("  [adapter] suppress native scroll for {}", pointer.0);
    }
}

fn touch(id: u64, x: f64, y: f64, ms: u64) -> PointerInput {
    PointerInput::new(
        PointerId(id),
        PointerType::Touch,
        Point::new(x, y),
        Duration::from_millis(ms),
    )
}

fn print_event(e: &StrokeEvent<'_>, target: &&str) {
    let s = e.sample;
    println!(
        "{:>5} on {target}: id={} at ({:.1}, {:.1}) d=({:.1}, {:.1}) active={} samples={}",
        e.kind().as_str(),
        s.identifier.0,
        s.position.x,
        s.position.y,
        s.delta.x,
        s.delta.y,
        s.active,
        e.stroke.len()
    );
    if let Some(segments) = e.simplified_stroke {
        for (i, seg) in segments.iter().enumerate() {
            println!("        segment {i}: {seg:?}");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // The canvas sits at (100, 50) in device space.
    let mut engine: StrokeBehavior<&str, AffineResolver, PrintAdapter> =
        StrokeBehavior::new(AffineResolver)
            .with_adapter(PrintAdapter)
            .with_container(|_, _| Affine::translate((100.0, 50.0)));
    engine.on("start.print move.print up.print end.print", print_event)?;

    let canvas = "canvas";
    let mut t = 0;
    engine.pointer_down(&touch(1, 100.0, 50.0, t), &canvas)?;
    for i in 1..=6 {
        t += 20;
        engine.pointer_move(&touch(1, 100.0 + i as f64 * 10.0, 50.0, t))?;
    }
    t += 20;
    engine.pointer_up(&touch(1, 170.0, 50.0, t))?;

    // Second finger, 250 ms later.
    t += 250;
    engine.pointer_down(&touch(2, 170.0, 60.0, t), &canvas)?;
    for i in 1..=6 {
        t += 20;
        engine.pointer_move(&touch(2, 170.0, 60.0 + i as f64 * 10.0, t))?;
    }
    t += 20;
    engine.pointer_up(&touch(2, 170.0, 130.0, t))?;

    while let Some(deadline) = engine.next_deadline() {
        println!("-- idle until {} ms --", deadline.as_millis());
        engine.advance(deadline);
    }
    assert_eq!(engine.gesture_count(), 0);
    Ok(())
}
