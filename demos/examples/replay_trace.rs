// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a recorded pointer trace.
//!
//! Loads a [`StrokeConfig`] and a list of pointer events from TOML, feeds them
//! through the engine on a simulated clock, and prints each finished stroke.
//! Engine lifecycle logs are shown through `tracing_subscriber`; set
//! `RUST_LOG_LEVEL=trace` to also see throttled moves and filtered presses.
//!
//! Run:
//! - `cargo run -p inkstroke_demos --example replay_trace`
//! - `cargo run -p inkstroke_demos --example replay_trace -- path/to/trace.toml`

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use std::time::Duration;

use inkstroke::types::{AffineResolver, InputKind, PointerId, PointerInput, PointerType};
use inkstroke::{StrokeBehavior, StrokeConfig, StrokeEvent};
use inkstroke_simplify::{Segment, SimplifyStats};
use kurbo::{Affine, Point};
use serde::Deserialize;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

const BUILTIN_TRACE: &str = include_str!("../data/trace.toml");
const FRAME_INTERVAL: Duration = Duration::from_millis(8);

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Down,
    Move,
    Up,
}

impl From<Kind> for InputKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Down => Self::Down,
            Kind::Move => Self::Move,
            Kind::Up => Self::Up,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TraceEvent {
    kind: Kind,
    pointer_id: PointerId,
    pointer_type: PointerType,
    x: f64,
    y: f64,
    #[serde(default)]
    button: i16,
    #[serde(default)]
    ctrl: bool,
    t_ms: u64,
}

impl TraceEvent {
    fn input(&self) -> PointerInput {
        PointerInput::new(
            self.pointer_id,
            self.pointer_type,
            Point::new(self.x, self.y),
            Duration::from_millis(self.t_ms),
        )
        .with_button(self.button)
        .with_ctrl(self.ctrl)
    }
}

#[derive(Debug, Deserialize)]
struct Container {
    origin: [f64; 2],
    scale: f64,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            scale: 1.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Trace {
    #[serde(default)]
    config: StrokeConfig,
    #[serde(default)]
    container: Container,
    events: Vec<TraceEvent>,
}

fn setup_logging() {
    let level = match std::env::var("RUST_LOG_LEVEL").as_deref() {
        Ok("trace") => Level::TRACE,
        Ok("info") => Level::INFO,
        _ => Level::DEBUG,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_line_number(true)
        .init();
}

fn load_trace() -> Result<Trace, Box<dyn Error>> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN_TRACE.to_owned(),
    };
    Ok(toml::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();
    let trace = load_trace()?;
    info!(
        events = trace.events.len(),
        completion_delay_ms = trace.config.completion_delay_ms,
        "trace loaded"
    );

    let transform = Affine::translate((trace.container.origin[0], trace.container.origin[1]))
        * Affine::scale(trace.container.scale);
    let mut engine: StrokeBehavior<(), AffineResolver> = StrokeBehavior::new(AffineResolver)
        .with_config(trace.config)
        .with_container(move |_, _| transform);

    let finished: Rc<RefCell<Vec<(usize, Vec<Segment>)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&finished);
    engine.on("end.collect", move |e: &StrokeEvent<'_>, _: &()| {
        if let Some(segments) = e.simplified_stroke {
            sink.borrow_mut().push((e.stroke.len(), segments.to_vec()));
        }
    })?;

    // Simulated display refreshing every 8 ms.
    let mut next_frame = Duration::ZERO;
    let mut accepted = 0;
    for event in &trace.events {
        let input = event.input();
        while next_frame <= input.timestamp {
            if engine.frame_requested() {
                engine.animation_frame(next_frame);
            }
            next_frame += FRAME_INTERVAL;
        }
        if engine.handle(event.kind.into(), &input, &())? {
            accepted += 1;
        }
    }
    while let Some(deadline) = engine.next_deadline() {
        engine.advance(deadline);
    }

    println!(
        "accepted {accepted} of {} events at {:.0} fps",
        trace.events.len(),
        engine.framerate()
    );
    for (i, (samples, segments)) in finished.borrow().iter().enumerate() {
        let stats = SimplifyStats {
            input_points: *samples,
            output_points: segments.iter().map(Vec::len).sum(),
        };
        println!(
            "stroke {i}: {} samples -> {} points in {} segment(s)",
            stats.input_points,
            stats.output_points,
            segments.len()
        );
        for seg in segments {
            let pts: Vec<String> = seg
                .iter()
                .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                .collect();
            println!("  {}", pts.join(" "));
        }
    }
    Ok(())
}
