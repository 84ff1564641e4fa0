// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerance, segment, and distance helpers shared by the simplifier.

use alloc::vec::Vec;

use kurbo::Point;

/// An ordered run of points simplified independently of its neighbors.
pub type Segment = Vec<Point>;

/// Default lower bound for the simplification tolerance, in coordinate units.
pub const DEFAULT_FLOOR: f64 = 5.0;

/// Default divisor applied to the chord length when scaling the tolerance.
pub const DEFAULT_LENGTH_DIVISOR: f64 = 7.0;

/// Length-adaptive perpendicular-distance threshold.
///
/// The effective epsilon for a chord from `start` to `end` is
/// `max(floor, distance(start, end) / length_divisor)`, so short strokes keep
/// detail down to `floor` units while long strokes shed proportionally more.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance {
    /// Minimum epsilon in coordinate units.
    pub floor: f64,
    /// Chord length is divided by this before comparing with `floor`.
    pub length_divisor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            length_divisor: DEFAULT_LENGTH_DIVISOR,
        }
    }
}

impl Tolerance {
    /// Default tolerance with a custom floor.
    pub fn with_floor(floor: f64) -> Self {
        Self {
            floor,
            ..Self::default()
        }
    }

    /// Effective epsilon for the chord `start`→`end`.
    #[inline]
    pub fn epsilon(&self, start: Point, end: Point) -> f64 {
        (start.distance(end) / self.length_divisor).max(self.floor)
    }
}

/// Distance from `point` to the infinite line through `start` and `end`.
///
/// The line is not clamped to the chord, so a point past either end can still
/// report a large distance. When `start` and `end` coincide there is no line
/// and the distance is zero, so nothing between them is kept.
#[inline]
pub fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let base = end - start;
    let len = base.hypot();
    if len == 0.0 {
        return 0.0;
    }
    base.cross(point - start).abs() / len
}

/// Total length of the polyline through `points`.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Point counts before and after simplification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    /// Points across all input segments.
    pub input_points: usize,
    /// Points across all output segments.
    pub output_points: usize,
}

impl SimplifyStats {
    /// Count points in matching input/output segment lists.
    pub fn measure(input: &[Segment], output: &[Segment]) -> Self {
        Self {
            input_points: input.iter().map(Vec::len).sum(),
            output_points: output.iter().map(Vec::len).sum(),
        }
    }

    /// Fraction of points removed, in `[0, 1]`. Zero for empty input.
    pub fn reduction(&self) -> f64 {
        if self.input_points == 0 {
            return 0.0;
        }
        1.0 - self.output_points as f64 / self.input_points as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn epsilon_uses_floor_for_short_chords() {
        let tol = Tolerance::default();
        assert_eq!(tol.epsilon(Point::ZERO, Point::new(14.0, 0.0)), 5.0);
    }

    #[test]
    fn epsilon_scales_with_long_chords() {
        let tol = Tolerance::default();
        assert_eq!(tol.epsilon(Point::ZERO, Point::new(70.0, 0.0)), 10.0);
        let tol = Tolerance::with_floor(20.0);
        assert_eq!(tol.epsilon(Point::ZERO, Point::new(70.0, 0.0)), 20.0);
    }

    // Point beyond the chord's extent still measures against the infinite line.
    #[test]
    fn perpendicular_distance_is_unclamped() {
        let d = perpendicular_distance(
            Point::new(50.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(d, 3.0);
    }

    #[test]
    fn perpendicular_distance_matches_area_over_base() {
        let (a, b, p) = (Point::new(1.0, 2.0), Point::new(7.0, 10.0), Point::new(3.0, 9.0));
        let area = ((b.y - a.y) * p.x - (b.x - a.x) * p.y + b.x * a.y - b.y * a.x).abs();
        let expected = area / a.distance(b);
        assert!((perpendicular_distance(p, a, b) - expected).abs() < 1e-12);
    }

    #[test]
    fn degenerate_chord_has_zero_distance() {
        let d = perpendicular_distance(Point::new(3.0, 4.0), Point::ZERO, Point::ZERO);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn stats_report_reduction() {
        let input = vec![vec![Point::ZERO; 8], vec![Point::ZERO; 2]];
        let output = vec![vec![Point::ZERO; 2], vec![Point::ZERO; 2]];
        let stats = SimplifyStats::measure(&input, &output);
        assert_eq!(stats.input_points, 10);
        assert_eq!(stats.output_points, 4);
        assert!((stats.reduction() - 0.6).abs() < 1e-12);
        assert_eq!(SimplifyStats::default().reduction(), 0.0);
    }

    #[test]
    fn path_length_sums_edges() {
        let pts = [Point::ZERO, Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
        assert_eq!(path_length(&pts), 11.0);
        assert_eq!(path_length(&pts[..1]), 0.0);
    }
}
