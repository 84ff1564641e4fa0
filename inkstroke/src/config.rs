// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data engine configuration.
//!
//! Predicates (`filter`, `container`, `touchable`) are closures and are set on
//! the engine directly; everything that can be written down in a file lives
//! here. With the `serde` feature, missing fields fall back to their defaults.

use core::time::Duration;

use inkstroke_simplify::{DEFAULT_FLOOR, DEFAULT_LENGTH_DIVISOR, Tolerance};

/// Default completion window in milliseconds.
pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 600;

/// Default displacement, in device units, after which native scrolling is
/// suppressed for the rest of a gesture.
pub const DEFAULT_SCROLL_LOCK_DISTANCE: f64 = 10.0;

/// Refresh rate assumed until the first measurement completes.
pub const DEFAULT_FRAMERATE: f64 = 60.0;

/// Tunables for [`StrokeBehavior`](crate::engine::StrokeBehavior).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StrokeConfig {
    /// Inactivity window after the last sample before a gesture finalizes.
    pub completion_delay_ms: u64,
    /// Minimum simplification tolerance in local units.
    pub simplification_floor: f64,
    /// Device-space displacement from the first press that latches native
    /// scroll suppression.
    pub scroll_lock_distance: f64,
    /// Frames per second used for move throttling before any measurement.
    pub initial_framerate: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: DEFAULT_COMPLETION_DELAY_MS,
            simplification_floor: DEFAULT_FLOOR,
            scroll_lock_distance: DEFAULT_SCROLL_LOCK_DISTANCE,
            initial_framerate: DEFAULT_FRAMERATE,
        }
    }
}

impl StrokeConfig {
    /// Completion window as a [`Duration`].
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Simplification tolerance derived from the floor.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            floor: self.simplification_floor,
            length_divisor: DEFAULT_LENGTH_DIVISOR,
        }
    }

    /// Initial framerate, or the default when the configured one is unusable.
    pub fn effective_framerate(&self) -> f64 {
        if self.initial_framerate.is_finite() && self.initial_framerate > 0.0 {
            self.initial_framerate
        } else {
            DEFAULT_FRAMERATE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = StrokeConfig::default();
        assert_eq!(cfg.completion_delay(), Duration::from_millis(600));
        assert_eq!(cfg.tolerance(), Tolerance::default());
        assert_eq!(cfg.scroll_lock_distance, 10.0);
        assert_eq!(cfg.effective_framerate(), 60.0);
    }

    #[test]
    fn unusable_framerate_falls_back() {
        let mut cfg = StrokeConfig {
            initial_framerate: 0.0,
            ..StrokeConfig::default()
        };
        assert_eq!(cfg.effective_framerate(), DEFAULT_FRAMERATE);
        cfg.initial_framerate = f64::NAN;
        assert_eq!(cfg.effective_framerate(), DEFAULT_FRAMERATE);
        cfg.initial_framerate = 120.0;
        assert_eq!(cfg.effective_framerate(), 120.0);
    }

    #[test]
    fn floor_feeds_tolerance() {
        let cfg = StrokeConfig {
            simplification_floor: 2.5,
            ..StrokeConfig::default()
        };
        assert_eq!(cfg.tolerance().floor, 2.5);
    }
}
