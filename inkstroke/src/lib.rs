// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkstroke: a deterministic, `no_std` engine that turns pointer input into strokes.
//!
//! ## Overview
//!
//! Feed raw down/move/up input into a [`StrokeBehavior`](crate::engine::StrokeBehavior).
//! It groups the input into gestures, one per pressed pointer, and emits four
//! kinds of events to named listeners: `start`, `move`, `up`, and `end`.
//! The `end` event fires once a gesture has been quiet for the completion
//! window and carries the stroke simplified into polylines
//! (see [`inkstroke_simplify`]).
//!
//! ## Gestures
//!
//! - A press that passes the filter begins a gesture and captures the datum,
//!   the coordinate container, and a snapshot of the listeners.
//! - Moves are throttled to at most one per display frame. The frame interval
//!   is measured from two animation frames after each start.
//! - Releasing a pointer does not end its gesture. A press that arrives before
//!   the completion window closes takes the gesture over (hand-off), so a
//!   stroke drawn with several touches, or several clicks of the same mouse,
//!   becomes one multi-segment stroke.
//!
//! ## Time
//!
//! The engine never reads a clock. Inputs carry timestamps, and the host calls
//! [`advance`](crate::engine::StrokeBehavior::advance) at
//! [`next_deadline`](crate::engine::StrokeBehavior::next_deadline) and
//! [`animation_frame`](crate::engine::StrokeBehavior::animation_frame) while
//! [`frame_requested`](crate::engine::StrokeBehavior::frame_requested) holds.
//! Given the same input sequence, the output is always the same.
//!
//! ## Collaborators
//!
//! - [`CoordinateResolver`](crate::types::CoordinateResolver) maps device
//!   positions to container-local ones. [`AffineResolver`](crate::types::AffineResolver)
//!   covers the common case of an affine container transform.
//! - [`InputAdapter`](crate::types::InputAdapter) receives the outbound signals:
//!   track a pointer, release it, suppress native scrolling.
//!
//! ```
//! use core::time::Duration;
//! use inkstroke::engine::StrokeBehavior;
//! use inkstroke::types::{AffineResolver, PointerId, PointerInput, PointerType, StrokeEvent};
//! use kurbo::Point;
//!
//! let mut engine: StrokeBehavior<&str, AffineResolver> = StrokeBehavior::new(AffineResolver);
//! engine
//!     .on("start.demo", |e: &StrokeEvent<'_>, target: &&str| {
//!         assert_eq!(*target, "canvas");
//!         assert_eq!(e.sample.active, 0);
//!     })
//!     .unwrap();
//!
//! let down = PointerInput::new(PointerId(1), PointerType::Pen, Point::new(4.0, 2.0), Duration::ZERO);
//! assert!(engine.pointer_down(&down, &"canvas").unwrap());
//! assert_eq!(engine.active(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Logging goes through `tracing`;
//! install a subscriber in the host to see gesture lifecycle events.

#![no_std]

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod registry;
pub mod simplify;
pub mod timing;
pub mod types;

pub use config::StrokeConfig;
pub use engine::StrokeBehavior;
pub use error::{DispatchError, GestureError, ResolveError};
pub use types::{EventKind, PointerId, PointerInput, PointerType, Sample, StrokeEvent};
