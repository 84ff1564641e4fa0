// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioning a gesture history into segments and simplifying them.

use alloc::vec::Vec;

use inkstroke_simplify::{Segment, Tolerance, simplify_segments};

use crate::types::{EventKind, Sample};

/// Split `samples` at each `start` marker.
///
/// A `start` opens a new segment and is not itself part of it; samples before
/// the first `start` form a segment of their own. Empty segments are kept so
/// callers can see every marker.
pub fn partition_segments(samples: &[Sample]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for sample in samples {
        match (sample.kind, segments.last_mut()) {
            (EventKind::Start, _) => segments.push(Vec::new()),
            (_, Some(current)) => current.push(sample.position),
            (_, None) => segments.push(alloc::vec![sample.position]),
        }
    }
    segments
}

/// Simplify a gesture history into one polyline per segment.
///
/// Segments with no points are dropped.
pub fn simplify_stroke(samples: &[Sample], tolerance: Tolerance) -> Vec<Segment> {
    simplify_segments(partition_segments(samples), tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind::{Move, Start, Up};
    use crate::types::{PointerId, PointerInput, PointerType};
    use alloc::vec;
    use core::time::Duration;
    use kurbo::{Point, Vec2};

    fn sample(kind: EventKind, x: f64, y: f64) -> Sample {
        let position = Point::new(x, y);
        Sample {
            kind,
            position,
            delta: Vec2::ZERO,
            identifier: PointerId(1),
            pointer_type: PointerType::Touch,
            active: 0,
            timestamp: Duration::ZERO,
            source: PointerInput::new(PointerId(1), PointerType::Touch, position, Duration::ZERO),
        }
    }

    #[test]
    fn start_markers_open_segments() {
        let samples = [
            sample(Start, 0.0, 0.0),
            sample(Move, 1.0, 0.0),
            sample(Up, 2.0, 0.0),
            sample(Start, 9.0, 9.0),
            sample(Move, 10.0, 10.0),
        ];
        let segs = partition_segments(&samples);
        assert_eq!(
            segs,
            vec![
                vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
                vec![Point::new(10.0, 10.0)],
            ]
        );
    }

    // History that does not begin with a start still yields its points.
    #[test]
    fn leading_samples_form_implicit_segment() {
        let samples = [sample(Move, 1.0, 1.0), sample(Up, 2.0, 2.0)];
        assert_eq!(
            partition_segments(&samples),
            vec![vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]]
        );
    }

    #[test]
    fn back_to_back_starts_leave_empty_segments_out_of_result() {
        let samples = [
            sample(Start, 0.0, 0.0),
            sample(Start, 5.0, 5.0),
            sample(Move, 6.0, 5.0),
        ];
        assert_eq!(partition_segments(&samples).len(), 2);
        let out = simplify_stroke(&samples, Tolerance::default());
        assert_eq!(out, vec![vec![Point::new(6.0, 5.0)]]);
    }

    // A corner survives per segment; the straight second segment collapses.
    #[test]
    fn each_segment_simplified_independently() {
        let mut samples = vec![sample(Start, 0.0, 0.0)];
        for i in 0..=10 {
            samples.push(sample(Move, i as f64 * 10.0, 0.0));
        }
        for i in 1..=10 {
            samples.push(sample(Move, 100.0, i as f64 * 10.0));
        }
        samples.push(sample(Start, 0.0, 300.0));
        for i in 0..=5 {
            samples.push(sample(Move, i as f64 * 20.0, 300.0));
        }
        let out = simplify_stroke(&samples, Tolerance::default());
        assert_eq!(
            out,
            vec![
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(100.0, 0.0),
                    Point::new(100.0, 100.0)
                ],
                vec![Point::new(0.0, 300.0), Point::new(100.0, 300.0)],
            ]
        );
    }
}
