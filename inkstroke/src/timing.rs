// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred work: the completion debouncer and the framerate probe.
//!
//! Neither type owns a clock. The host reports time through
//! [`StrokeBehavior::advance`](crate::engine::StrokeBehavior::advance) and
//! frames through
//! [`StrokeBehavior::animation_frame`](crate::engine::StrokeBehavior::animation_frame).

use core::time::Duration;

/// Single-shot timer where each schedule replaces the previous one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    /// An idle debouncer with the given window.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The configured window.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer to fire `delay` after `now`, canceling any pending fire.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the timer will fire, if armed.
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether the timer is armed and its deadline is at or before `now`.
    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }

    /// Fire if due. Returns `true` at most once per schedule.
    pub fn fire(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Probe {
    Idle,
    AwaitingFirst,
    AwaitingSecond(Duration),
}

/// Estimates the display refresh rate from two consecutive frames.
///
/// [`request`](Self::request) arms a probe; the next two
/// [`on_frame`](Self::on_frame) calls measure the interval and update the
/// shared estimate to `1000 / Δt_ms`. The estimate sets the minimum spacing of
/// accepted move samples for every gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FramerateEstimator {
    framerate: f64,
    probe: Probe,
}

impl FramerateEstimator {
    /// An estimator starting at `framerate` frames per second.
    pub const fn new(framerate: f64) -> Self {
        Self {
            framerate,
            probe: Probe::Idle,
        }
    }

    /// Current estimate in frames per second.
    pub const fn framerate(&self) -> f64 {
        self.framerate
    }

    /// Ask for a measurement over the next two frames.
    ///
    /// A probe already in flight keeps running.
    pub fn request(&mut self) {
        if self.probe == Probe::Idle {
            self.probe = Probe::AwaitingFirst;
        }
    }

    /// Whether the host should deliver frame callbacks.
    pub fn is_requested(&self) -> bool {
        self.probe != Probe::Idle
    }

    /// Feed a frame timestamp. Returns the new estimate when a measurement
    /// completes.
    ///
    /// A zero or negative interval completes the probe without changing the
    /// estimate.
    pub fn on_frame(&mut self, at: Duration) -> Option<f64> {
        match self.probe {
            Probe::Idle => None,
            Probe::AwaitingFirst => {
                self.probe = Probe::AwaitingSecond(at);
                None
            }
            Probe::AwaitingSecond(first) => {
                self.probe = Probe::Idle;
                let dt = at.checked_sub(first).filter(|d| !d.is_zero())?;
                self.framerate = 1e9 / dt.as_nanos() as f64;
                Some(self.framerate)
            }
        }
    }

    /// Whether `elapsed` since the last accepted move is at least one frame.
    pub fn admits(&self, elapsed: Duration) -> bool {
        elapsed.as_nanos() as f64 >= 1e9 / self.framerate
    }
}
