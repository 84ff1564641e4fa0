// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ramer–Douglas–Peucker over an explicit work stack.
//!
//! The classic formulation recurses on `[0..=found]` and `[found..]` and joins
//! the halves. Here each pending range is pushed onto a stack and the split
//! point is marked as kept, which yields the same output without unbounded
//! recursion on adversarial zig-zag input.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::types::{Segment, Tolerance, perpendicular_distance};

/// Simplify one segment.
///
/// Segments of fewer than 3 points are returned unchanged. Otherwise the first
/// and last points are always kept, and an interior point survives only if it
/// is the farthest point of some sub-chord and lies more than that chord's
/// [`Tolerance::epsilon`] away from it.
pub fn simplify_segment(points: &[Point], tolerance: Tolerance) -> Segment {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0_usize, n - 1)];
    while let Some((first, last)) = stack.pop() {
        if last - first < 2 {
            continue;
        }
        let start = points[first];
        let end = points[last];
        let epsilon = tolerance.epsilon(start, end);

        let mut dmax = 0.0;
        let mut found = first;
        for (i, &p) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = perpendicular_distance(p, start, end);
            // Strict comparison keeps the first of equally distant points.
            if d > dmax {
                dmax = d;
                found = i;
            }
        }

        if dmax > epsilon {
            keep[found] = true;
            // Left half on top.
            stack.push((found, last));
            stack.push((first, found));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(&p, &k)| k.then_some(p))
        .collect()
}

/// Simplify each segment independently, dropping empty ones.
pub fn simplify_segments<I>(segments: I, tolerance: Tolerance) -> Vec<Segment>
where
    I: IntoIterator,
    I::Item: AsRef<[Point]>,
{
    segments
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| simplify_segment(s.as_ref(), tolerance))
        .collect()
}
