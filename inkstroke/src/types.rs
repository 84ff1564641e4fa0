// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: pointer input, samples, events, and the collaborator seams.
//!
//! ## Overview
//!
//! [`PointerInput`] is what a host input adapter feeds in. Each accepted input
//! becomes a [`Sample`] in its gesture's history, and listeners observe it
//! through a borrowed [`StrokeEvent`].
//!
//! Coordinate resolution and native listener management live outside the
//! engine, behind [`CoordinateResolver`] and [`InputAdapter`].

use core::time::Duration;

use inkstroke_simplify::Segment;
use kurbo::{Affine, Point, Vec2};

use crate::error::ResolveError;

/// Identifier assigned to a pointer by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// Device class of a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PointerType {
    /// Mouse or trackpad.
    Mouse,
    /// Finger on a touch surface.
    Touch,
    /// Stylus.
    Pen,
}

/// A raw pointer event as delivered by the input adapter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Host pointer identifier.
    pub pointer_id: PointerId,
    /// Device class.
    pub pointer_type: PointerType,
    /// Position in device space.
    pub position: Point,
    /// Button index; `0` is the primary button.
    pub button: i16,
    /// Whether the control modifier was held.
    pub ctrl_key: bool,
    /// Host timestamp of the event.
    pub timestamp: Duration,
}

impl PointerInput {
    /// Primary-button input without modifiers.
    pub fn new(
        pointer_id: PointerId,
        pointer_type: PointerType,
        position: Point,
        timestamp: Duration,
    ) -> Self {
        Self {
            pointer_id,
            pointer_type,
            position,
            button: 0,
            ctrl_key: false,
            timestamp,
        }
    }

    /// Replace the button index.
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Replace the control modifier state.
    pub fn with_ctrl(mut self, ctrl_key: bool) -> Self {
        self.ctrl_key = ctrl_key;
        self
    }
}

/// Kind of raw input handed to [`StrokeBehavior::handle`](crate::engine::StrokeBehavior::handle).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
}

/// Semantic event kinds emitted to listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A gesture started or was continued by a new pointer.
    Start,
    /// An accepted move sample.
    Move,
    /// The pointer was released; the gesture stays open until it goes quiet.
    Up,
    /// The gesture finalized after its completion window.
    End,
}

impl EventKind {
    /// All kinds in dispatch-table order.
    pub const ALL: [Self; 4] = [Self::Start, Self::Move, Self::Up, Self::End];

    /// Name used in listener typenames.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::Up => "up",
            Self::End => "end",
        }
    }

    /// Parse a typename kind.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// One recorded point of a gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Event kind this sample was emitted as.
    pub kind: EventKind,
    /// Position in container-local coordinates.
    pub position: Point,
    /// Offset from the previous emitted sample of the same gesture.
    pub delta: Vec2,
    /// Pointer that produced the sample.
    pub identifier: PointerId,
    /// Device class of that pointer.
    pub pointer_type: PointerType,
    /// Number of pressed gestures when the sample was taken.
    ///
    /// On `start` this excludes the starting gesture; on `up` it still
    /// includes the releasing one.
    pub active: usize,
    /// Host timestamp of the source input.
    pub timestamp: Duration,
    /// The raw input this sample came from.
    pub source: PointerInput,
}

/// What a listener receives: a sample plus the gesture it belongs to.
#[derive(Copy, Clone, Debug)]
pub struct StrokeEvent<'a> {
    /// The sample being emitted.
    pub sample: &'a Sample,
    /// Every sample of the gesture so far, including this one on
    /// `start`/`move`/`up`.
    pub stroke: &'a [Sample],
    /// Simplified segments; only present on `end`.
    pub simplified_stroke: Option<&'a [Segment]>,
}

impl StrokeEvent<'_> {
    /// Kind of the emitted sample.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.sample.kind
    }

    /// Local position of the emitted sample.
    #[inline]
    pub fn position(&self) -> Point {
        self.sample.position
    }
}

/// Maps a raw input to container-local coordinates.
///
/// Called once per accepted sample. Errors are returned to the caller of the
/// engine, never swallowed.
pub trait CoordinateResolver {
    /// Coordinate-space reference captured when a gesture starts.
    type Container: Clone;
    /// Resolution failure.
    type Error: core::error::Error + 'static;

    /// Resolve `input` against `container`.
    fn resolve(
        &self,
        input: &PointerInput,
        container: &Self::Container,
    ) -> Result<Point, Self::Error>;
}

/// Resolver whose container is the local→device transform of the target.
///
/// Local coordinates are the device position mapped through the inverse
/// transform.
#[derive(Copy, Clone, Debug, Default)]
pub struct AffineResolver;

impl CoordinateResolver for AffineResolver {
    type Container = Affine;
    type Error = ResolveError;

    fn resolve(&self, input: &PointerInput, container: &Affine) -> Result<Point, ResolveError> {
        let det = container.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(ResolveError::SingularTransform);
        }
        Ok(container.inverse() * input.position)
    }
}

/// Outbound signals to the host's input adapter.
///
/// All methods default to no-ops.
pub trait InputAdapter {
    /// Start delivering move/up input for `pointer`.
    fn track(&mut self, _pointer: PointerId) {}

    /// Stop delivering move/up input for `pointer`.
    fn release(&mut self, _pointer: PointerId) {}

    /// Suppress the platform's native scroll and gesture handling while
    /// `pointer` is drawing.
    fn suppress_native_scroll(&mut self, _pointer: PointerId) {}
}

/// An adapter that ignores every signal.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoAdapter;

impl InputAdapter for NoAdapter {}
