// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stroke engine: routes raw pointer input into gestures.
//!
//! ## Time
//!
//! [`StrokeBehavior`] never reads a clock. Every input call first advances the
//! engine to the input's timestamp, so overdue gestures finalize before the
//! input is looked at. Between inputs the host calls [`StrokeBehavior::advance`]
//! at (or after) [`StrokeBehavior::next_deadline`], and forwards display frames
//! to [`StrokeBehavior::animation_frame`] while
//! [`StrokeBehavior::frame_requested`] is true.
//!
//! ## Starting a gesture
//!
//! A press is considered when it passes the `touchable` gate (touch input only)
//! and the `filter`. It then either:
//!
//! - continues the pressing pointer's own released gesture,
//! - takes over the pending gesture (hand-off), or
//! - begins a fresh gesture that captures the datum, the container, and a
//!   snapshot of the registered listeners.
//!
//! A press for a pointer that is already down is ignored.
//!
//! ```
//! use core::time::Duration;
//! use inkstroke::engine::StrokeBehavior;
//! use inkstroke::types::{AffineResolver, PointerId, PointerInput, PointerType, StrokeEvent};
//! use kurbo::Point;
//!
//! let mut engine: StrokeBehavior<(), AffineResolver> = StrokeBehavior::new(AffineResolver);
//! engine
//!     .on("end.log", |e: &StrokeEvent<'_>, _: &()| {
//!         assert_eq!(e.simplified_stroke.map(|s| s.len()), Some(1));
//!     })
//!     .unwrap();
//!
//! let at = |x: f64, ms: u64| {
//!     PointerInput::new(PointerId(1), PointerType::Pen, Point::new(x, 0.0), Duration::from_millis(ms))
//! };
//! engine.pointer_down(&at(0.0, 0), &()).unwrap();
//! engine.pointer_move(&at(10.0, 20)).unwrap();
//! engine.pointer_move(&at(20.0, 40)).unwrap();
//! engine.pointer_up(&at(30.0, 60)).unwrap();
//!
//! assert_eq!(engine.next_deadline(), Some(Duration::from_millis(660)));
//! assert_eq!(engine.advance(Duration::from_millis(660)), 1);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::time::Duration;

use crate::config::StrokeConfig;
use crate::dispatch::{Dispatch, Listener};
use crate::error::{DispatchError, GestureError};
use crate::gesture::{Gesture, GesturePhase};
use crate::registry::Registry;
use crate::timing::FramerateEstimator;
use crate::types::{
    CoordinateResolver, EventKind, InputAdapter, InputKind, NoAdapter, PointerId, PointerInput,
    PointerType, StrokeEvent,
};

/// Decides whether a press may start a gesture.
pub type FilterFn<D> = Box<dyn Fn(&PointerInput, &D) -> bool>;

/// Produces the coordinate-space reference for a new gesture.
pub type ContainerFn<D, C> = Box<dyn Fn(&PointerInput, &D) -> C>;

/// Decides whether touch input is considered for a datum.
pub type TouchableFn<D> = Box<dyn Fn(&D) -> bool>;

/// Default filter: primary button without the control modifier.
pub fn default_filter(input: &PointerInput) -> bool {
    !input.ctrl_key && input.button == 0
}

/// Converts pointer input into strokes and emits them to listeners.
///
/// `D` is the datum bound to the drawing target, passed back to every
/// listener. `R` maps device positions to container-local ones. `A` receives
/// outbound signals for the host's native input plumbing.
pub struct StrokeBehavior<D, R: CoordinateResolver, A = NoAdapter> {
    config: StrokeConfig,
    filter: FilterFn<D>,
    container: ContainerFn<D, R::Container>,
    touchable: TouchableFn<D>,
    resolver: R,
    adapter: A,
    listeners: Dispatch<D>,
    registry: Registry<D, R::Container>,
    framerate: FramerateEstimator,
    now: Duration,
}

impl<D, R: CoordinateResolver, A> core::fmt::Debug for StrokeBehavior<D, R, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrokeBehavior")
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .field("registry", &self.registry)
            .field("framerate", &self.framerate)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<D, R> StrokeBehavior<D, R>
where
    R: CoordinateResolver,
    R::Container: Default,
{
    /// An engine with the default configuration, predicates, and no adapter.
    pub fn new(resolver: R) -> Self {
        Self::with_parts(resolver, NoAdapter, StrokeConfig::default())
    }
}

impl<D, R, A> StrokeBehavior<D, R, A>
where
    R: CoordinateResolver,
    R::Container: Default,
{
    fn with_parts(resolver: R, adapter: A, config: StrokeConfig) -> Self {
        Self {
            framerate: FramerateEstimator::new(config.effective_framerate()),
            config,
            filter: Box::new(|input: &PointerInput, _: &D| default_filter(input)),
            container: Box::new(|_: &PointerInput, _: &D| R::Container::default()),
            touchable: Box::new(|_: &D| true),
            resolver,
            adapter,
            listeners: Dispatch::new(),
            registry: Registry::new(),
            now: Duration::ZERO,
        }
    }
}

impl<D, R: CoordinateResolver, A> StrokeBehavior<D, R, A> {
    /// Replace the configuration. Resets the framerate estimate.
    pub fn with_config(mut self, config: StrokeConfig) -> Self {
        self.framerate = FramerateEstimator::new(config.effective_framerate());
        self.config = config;
        self
    }

    /// Route outbound signals to `adapter`.
    pub fn with_adapter<B: InputAdapter>(self, adapter: B) -> StrokeBehavior<D, R, B> {
        StrokeBehavior {
            config: self.config,
            filter: self.filter,
            container: self.container,
            touchable: self.touchable,
            resolver: self.resolver,
            adapter,
            listeners: self.listeners,
            registry: self.registry,
            framerate: self.framerate,
            now: self.now,
        }
    }

    /// Replace the press filter.
    pub fn with_filter(mut self, filter: impl Fn(&PointerInput, &D) -> bool + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Replace the container lookup used when a gesture begins.
    pub fn with_container(
        mut self,
        container: impl Fn(&PointerInput, &D) -> R::Container + 'static,
    ) -> Self {
        self.container = Box::new(container);
        self
    }

    /// Replace the touch gate.
    pub fn with_touchable(mut self, touchable: impl Fn(&D) -> bool + 'static) -> Self {
        self.touchable = Box::new(touchable);
        self
    }

    /// The press filter in effect.
    pub fn filter(&self) -> &dyn Fn(&PointerInput, &D) -> bool {
        &*self.filter
    }

    /// The container lookup in effect.
    pub fn container(&self) -> &dyn Fn(&PointerInput, &D) -> R::Container {
        &*self.container
    }

    /// The touch gate in effect.
    pub fn touchable(&self) -> &dyn Fn(&D) -> bool {
        &*self.touchable
    }

    /// Current configuration.
    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// The coordinate resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The input adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The input adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Register `listener` for `typenames` (see [`Dispatch`] for the grammar).
    ///
    /// Gestures already in progress keep the listeners they started with.
    pub fn on(
        &mut self,
        typenames: &str,
        listener: impl Fn(&StrokeEvent<'_>, &D) + 'static,
    ) -> Result<(), DispatchError> {
        self.listeners.on(typenames, Rc::new(listener))
    }

    /// Remove the listeners addressed by `typenames`.
    pub fn off(&mut self, typenames: &str) -> Result<(), DispatchError> {
        self.listeners.off(typenames)
    }

    /// The listener currently registered for `typenames`.
    pub fn listener(&self, typenames: &str) -> Result<Option<Listener<D>>, DispatchError> {
        self.listeners.get(typenames)
    }

    /// The listener table new gestures will snapshot.
    pub fn listeners(&self) -> &Dispatch<D> {
        &self.listeners
    }

    /// Number of gestures whose pointer is pressed.
    pub fn active(&self) -> usize {
        self.registry.active()
    }

    /// Number of live gestures, including released ones awaiting completion.
    pub fn gesture_count(&self) -> usize {
        self.registry.len()
    }

    /// The pointer whose gesture is awaiting hand-off, if any.
    pub fn pending(&self) -> Option<PointerId> {
        self.registry.pending()
    }

    /// The live gesture driven by `id`.
    pub fn gesture(&self, id: PointerId) -> Option<&Gesture<D, R::Container>> {
        self.registry.get(id)
    }

    /// Current framerate estimate.
    pub fn framerate(&self) -> f64 {
        self.framerate.framerate()
    }

    /// Whether the host should deliver [`animation_frame`](Self::animation_frame) calls.
    pub fn frame_requested(&self) -> bool {
        self.framerate.is_requested()
    }

    /// Latest time the engine has been advanced to.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the host should next call [`advance`](Self::advance).
    pub fn next_deadline(&self) -> Option<Duration> {
        self.registry.next_deadline()
    }

    /// Feed a display frame timestamp to the framerate probe.
    ///
    /// Returns the new estimate when a measurement completes.
    pub fn animation_frame(&mut self, at: Duration) -> Option<f64> {
        let measured = self.framerate.on_frame(at)?;
        tracing::debug!(framerate = measured, "framerate measured");
        Some(measured)
    }
}

impl<D, R: CoordinateResolver, A: InputAdapter> StrokeBehavior<D, R, A> {
    /// Move time forward to `now` and finalize every gesture whose completion
    /// window has closed, earliest deadline first.
    ///
    /// Time never moves backwards. Returns the number of finalized gestures.
    pub fn advance(&mut self, now: Duration) -> usize {
        self.now = self.now.max(now);
        let mut finalized = 0;
        while let Some(id) = self.registry.next_due(self.now) {
            self.finalize(id);
            finalized += 1;
        }
        finalized
    }

    /// Dispatch a raw input by kind.
    ///
    /// Returns whether the input produced a sample.
    pub fn handle(
        &mut self,
        kind: InputKind,
        input: &PointerInput,
        datum: &D,
    ) -> Result<bool, GestureError<R::Error>>
    where
        D: Clone,
    {
        match kind {
            InputKind::Down => self.pointer_down(input, datum),
            InputKind::Move => self.pointer_move(input),
            InputKind::Up => self.pointer_up(input),
        }
    }

    /// A pointer was pressed on the target bound to `datum`.
    ///
    /// Returns `Ok(true)` when a `start` was emitted.
    pub fn pointer_down(
        &mut self,
        input: &PointerInput,
        datum: &D,
    ) -> Result<bool, GestureError<R::Error>>
    where
        D: Clone,
    {
        self.advance(input.timestamp);
        let id = input.pointer_id;

        if input.pointer_type == PointerType::Touch && !(self.touchable)(datum) {
            tracing::trace!(pointer = id.0, "touch input not accepted");
            return Ok(false);
        }
        if !(self.filter)(input, datum) {
            tracing::trace!(pointer = id.0, button = input.button, "press filtered");
            return Ok(false);
        }

        let from = match self.registry.get(id) {
            Some(g) if g.phase() == GesturePhase::Pressed => {
                tracing::trace!(pointer = id.0, "press for pointer already down");
                return Ok(false);
            }
            Some(_) => Some(id),
            None => self.registry.pending(),
        };

        let started = match from {
            Some(from) => self.continue_gesture(from, input)?,
            None => self.begin_gesture(input, datum)?,
        };
        if !started {
            return Ok(false);
        }
        self.framerate.request();
        self.adapter.track(id);
        if let Some(g) = self.registry.get(id) {
            g.emit_last();
        }
        Ok(true)
    }

    /// A tracked pointer moved.
    ///
    /// Returns `Ok(true)` when a `move` was emitted; throttled moves and moves
    /// of unknown or released pointers return `Ok(false)`.
    pub fn pointer_move(&mut self, input: &PointerInput) -> Result<bool, GestureError<R::Error>> {
        self.advance(input.timestamp);
        let id = input.pointer_id;
        let Some(gesture) = self.registry.get(id) else {
            tracing::trace!(pointer = id.0, "move for untracked pointer");
            return Ok(false);
        };
        if gesture.phase() != GesturePhase::Pressed {
            return Ok(false);
        }
        if !gesture.move_due(input.timestamp, &self.framerate) {
            tracing::trace!(pointer = id.0, "move throttled");
            return Ok(false);
        }
        let position = self
            .resolver
            .resolve(input, gesture.container())
            .map_err(GestureError::Resolve)?;

        let active = self.registry.active();
        let Some(gesture) = self.registry.get_mut(id) else {
            return Ok(false);
        };
        if gesture.latch_scroll(input, self.config.scroll_lock_distance) {
            tracing::debug!(pointer = id.0, "native scroll suppressed");
            self.adapter.suppress_native_scroll(id);
        }
        gesture.record(EventKind::Move, input, position, active);
        gesture.touch(self.now);
        gesture.emit_last();
        Ok(true)
    }

    /// A tracked pointer was released.
    ///
    /// The gesture stays live, and available for hand-off, until its
    /// completion window closes. Returns `Ok(true)` when an `up` was emitted.
    pub fn pointer_up(&mut self, input: &PointerInput) -> Result<bool, GestureError<R::Error>> {
        self.advance(input.timestamp);
        let id = input.pointer_id;
        let Some(gesture) = self.registry.get(id) else {
            tracing::trace!(pointer = id.0, "up for untracked pointer");
            return Ok(false);
        };
        if gesture.phase() != GesturePhase::Pressed {
            return Ok(false);
        }
        let position = self
            .resolver
            .resolve(input, gesture.container())
            .map_err(GestureError::Resolve)?;

        let active = self.registry.active();
        self.registry.release();
        self.registry.mark_pending(id);
        self.adapter.release(id);
        let Some(gesture) = self.registry.get_mut(id) else {
            return Ok(false);
        };
        gesture.release();
        gesture.record(EventKind::Up, input, position, active);
        gesture.touch(self.now);
        gesture.emit_last();
        Ok(true)
    }

    /// Drop every live gesture without emitting `end`.
    ///
    /// Pointers that are still pressed are released through the adapter.
    /// Returns the number of dropped gestures.
    pub fn clear(&mut self) -> usize {
        let drained = self.registry.drain();
        for gesture in &drained {
            if gesture.phase() == GesturePhase::Pressed {
                self.adapter.release(gesture.identifier());
            }
        }
        tracing::debug!(dropped = drained.len(), "gestures cleared");
        drained.len()
    }

    fn begin_gesture(
        &mut self,
        input: &PointerInput,
        datum: &D,
    ) -> Result<bool, GestureError<R::Error>>
    where
        D: Clone,
    {
        let container = (self.container)(input, datum);
        let position = self
            .resolver
            .resolve(input, &container)
            .map_err(GestureError::Resolve)?;
        let mut gesture = Gesture::new(
            input,
            position,
            datum.clone(),
            container,
            self.listeners.clone(),
            self.config.completion_delay(),
        );
        let active = self.registry.acquire();
        gesture.record(EventKind::Start, input, position, active);
        self.registry.insert(gesture);
        tracing::debug!(pointer = input.pointer_id.0, active, "gesture started");
        Ok(true)
    }

    fn continue_gesture(
        &mut self,
        from: PointerId,
        input: &PointerInput,
    ) -> Result<bool, GestureError<R::Error>> {
        let to = input.pointer_id;
        let Some(gesture) = self.registry.get(from) else {
            return Ok(false);
        };
        let position = self
            .resolver
            .resolve(input, gesture.container())
            .map_err(GestureError::Resolve)?;
        let active = self.registry.active();
        let Some(gesture) = self.registry.hand_off(from, to) else {
            return Ok(false);
        };
        gesture.record(EventKind::Start, input, position, active);
        self.registry.acquire();
        tracing::debug!(from = from.0, to = to.0, active, "gesture handed off");
        Ok(true)
    }

    fn finalize(&mut self, id: PointerId) {
        let Some(mut gesture) = self.registry.remove(id) else {
            return;
        };
        gesture.fire(self.now);
        if gesture.phase() == GesturePhase::Pressed {
            self.registry.release();
            self.adapter.release(id);
        }
        let active = self.registry.active();
        let samples = gesture.history().len();
        match gesture.finish(self.config.tolerance(), active) {
            Some(segments) => tracing::debug!(
                pointer = id.0,
                samples,
                segments = segments.len(),
                "gesture finalized"
            ),
            None => tracing::debug!(pointer = id.0, samples, "short gesture discarded"),
        }
    }
}
