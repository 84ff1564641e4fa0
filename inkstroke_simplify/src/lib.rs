// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkstroke Simplify: Kurbo-native polyline simplification for pointer strokes.
//!
//! This crate reduces an ordered run of points to the subset that carries its
//! shape, using the Ramer–Douglas–Peucker algorithm with a length-adaptive
//! tolerance.
//!
//! - The tolerance for a chord is `max(floor, chord_length / 7)` by default,
//!   so detail is judged relative to the size of the stroke. See [`Tolerance`].
//! - Distances are measured to the infinite line through the chord, not the
//!   clamped segment.
//! - The first and last point of every segment are always kept.
//! - Segments with fewer than 3 points pass through unchanged.
//!
//! The implementation uses an explicit work stack, so deep zig-zag input does
//! not grow the call stack.
//!
//! # Example
//!
//! ```rust
//! use inkstroke_simplify::{Tolerance, simplify_segment};
//! use kurbo::Point;
//!
//! // An L-shaped stroke sampled every 10 units.
//! let mut stroke: Vec<Point> = (0..=10).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect();
//! stroke.extend((1..=10).map(|i| Point::new(100.0, i as f64 * 10.0)));
//!
//! let simplified = simplify_segment(&stroke, Tolerance::default());
//! assert_eq!(
//!     simplified,
//!     vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)]
//! );
//! ```
//!
//! Multi-segment strokes are simplified segment by segment with
//! [`simplify_segments`], which also drops empty segments.
//!
//! This crate is `no_std` and uses `alloc`. Enable either the `std` (default)
//! or the `libm` feature for Kurbo's floating-point support.

#![no_std]

extern crate alloc;

pub mod simplify;
pub mod types;

pub use simplify::{simplify_segment, simplify_segments};
pub use types::{
    DEFAULT_FLOOR, DEFAULT_LENGTH_DIVISOR, Segment, SimplifyStats, Tolerance, path_length,
    perpendicular_distance,
};
