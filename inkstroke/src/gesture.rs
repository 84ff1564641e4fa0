// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture state: sample history, deltas, throttling, and emission.
//!
//! A [`Gesture`] is owned by the [`Registry`](crate::registry::Registry) slot of
//! the pointer currently driving it. It never touches the shared active
//! counter; callers pass the `active` value to record with each sample.

use alloc::vec::Vec;
use core::time::Duration;

use inkstroke_simplify::{Segment, Tolerance};
use kurbo::Point;

use crate::dispatch::Dispatch;
use crate::simplify::simplify_stroke;
use crate::timing::{Debouncer, FramerateEstimator};
use crate::types::{EventKind, PointerId, PointerInput, Sample, StrokeEvent};

/// Gestures with this many samples or fewer finalize without an `end` event.
pub const SHORT_GESTURE_SAMPLES: usize = 2;

/// Whether the driving pointer is still pressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// Between `start` and `up`; counted as active.
    Pressed,
    /// After `up`, waiting for the completion window or a hand-off.
    Released,
}

/// One continuous interaction, possibly extended across pointers by hand-off.
pub struct Gesture<D, C> {
    identifier: PointerId,
    phase: GesturePhase,
    origin: Point,
    previous_point: Point,
    history: Vec<Sample>,
    debouncer: Debouncer,
    last_move: Option<Duration>,
    scroll_locked: bool,
    datum: D,
    container: C,
    dispatch: Dispatch<D>,
}

impl<D, C> core::fmt::Debug for Gesture<D, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gesture")
            .field("identifier", &self.identifier)
            .field("phase", &self.phase)
            .field("samples", &self.history.len())
            .field("deadline", &self.debouncer.deadline())
            .field("scroll_locked", &self.scroll_locked)
            .finish_non_exhaustive()
    }
}

impl<D, C> Gesture<D, C> {
    /// A gesture for the pressed pointer in `input`, not yet holding samples.
    ///
    /// `position` is the resolved local position of `input`; it seeds the
    /// delta of the first sample to zero.
    pub fn new(
        input: &PointerInput,
        position: Point,
        datum: D,
        container: C,
        dispatch: Dispatch<D>,
        completion_delay: Duration,
    ) -> Self {
        Self {
            identifier: input.pointer_id,
            phase: GesturePhase::Pressed,
            origin: input.position,
            previous_point: position,
            history: Vec::new(),
            debouncer: Debouncer::new(completion_delay),
            last_move: None,
            scroll_locked: false,
            datum,
            container,
            dispatch,
        }
    }

    /// Pointer currently driving the gesture.
    pub fn identifier(&self) -> PointerId {
        self.identifier
    }

    /// Press state of the driving pointer.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Recorded samples in arrival order.
    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    /// Coordinate-space reference captured at the first start.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Datum captured at the first start.
    pub fn datum(&self) -> &D {
        &self.datum
    }

    /// Completion deadline, if armed.
    pub fn deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Whether native scroll suppression has latched.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Whether a move at `at` clears the frame throttle.
    ///
    /// The first move of a gesture is always due.
    pub fn move_due(&self, at: Duration, framerate: &FramerateEstimator) -> bool {
        match self.last_move {
            Some(last) => at >= last && framerate.admits(at - last),
            None => true,
        }
    }

    /// Append a sample and return it.
    ///
    /// The delta is taken against the previous emitted sample. Accepted moves
    /// also reset the throttle clock.
    pub fn record(
        &mut self,
        kind: EventKind,
        input: &PointerInput,
        position: Point,
        active: usize,
    ) -> &Sample {
        let sample = Sample {
            kind,
            position,
            delta: position - self.previous_point,
            identifier: input.pointer_id,
            pointer_type: input.pointer_type,
            active,
            timestamp: input.timestamp,
            source: *input,
        };
        self.previous_point = position;
        if kind == EventKind::Move {
            self.last_move = Some(input.timestamp);
        }
        self.history.push(sample);
        &self.history[self.history.len() - 1]
    }

    /// Latch native scroll suppression once the raw position has strayed more
    /// than `threshold` from the first press. Returns `true` only on the call
    /// that trips the latch.
    pub fn latch_scroll(&mut self, input: &PointerInput, threshold: f64) -> bool {
        if self.scroll_locked || self.origin.distance(input.position) <= threshold {
            return false;
        }
        self.scroll_locked = true;
        true
    }

    /// Restart the completion window from `now`.
    pub fn touch(&mut self, now: Duration) {
        self.debouncer.schedule(now);
    }

    /// Consume the completion timer if it is due at `now`.
    pub fn fire(&mut self, now: Duration) -> bool {
        self.debouncer.fire(now)
    }

    /// The driving pointer was released.
    pub fn release(&mut self) {
        self.phase = GesturePhase::Released;
    }

    /// Continue the gesture under `identifier`; the completion timer keeps
    /// running.
    pub fn hand_off(&mut self, identifier: PointerId) {
        self.identifier = identifier;
        self.phase = GesturePhase::Pressed;
    }

    /// Emit the most recent sample to the listener snapshot.
    pub fn emit_last(&self) {
        let Some(sample) = self.history.last() else {
            return;
        };
        let event = StrokeEvent {
            sample,
            stroke: &self.history,
            simplified_stroke: None,
        };
        self.dispatch.call(sample.kind, &event, &self.datum);
    }

    /// Simplify the history and emit `end`, unless the gesture is too short
    /// to carry shape. Returns the simplified segments when `end` was emitted.
    pub fn finish(&self, tolerance: Tolerance, active: usize) -> Option<Vec<Segment>> {
        if self.history.len() <= SHORT_GESTURE_SAMPLES {
            return None;
        }
        let last = self.history.last()?;
        let segments = simplify_stroke(&self.history, tolerance);
        let end = Sample {
            kind: EventKind::End,
            active,
            ..*last
        };
        let event = StrokeEvent {
            sample: &end,
            stroke: &self.history,
            simplified_stroke: Some(&segments),
        };
        self.dispatch.call(EventKind::End, &event, &self.datum);
        Some(segments)
    }
}
