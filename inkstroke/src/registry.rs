// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer → gesture routing, the pending hand-off marker, and the active
//! counter.
//!
//! ## Hand-off
//!
//! Releasing a pointer marks its gesture pending instead of removing it. A
//! press that arrives before the gesture's completion window closes can take it
//! over with [`Registry::hand_off`], which re-keys the same [`Gesture`] under
//! the new pointer. At most one identifier is pending at a time; the latest
//! release wins.
//!
//! ## Active counter
//!
//! The counter tracks gestures whose pointer is pressed. The engine acquires
//! it on every start (fresh or handed off) and releases it on `up`, or at
//! finalization if the gesture never saw an `up`.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::time::Duration;

use crate::gesture::Gesture;
use crate::types::PointerId;

/// All live gestures of one engine.
pub struct Registry<D, C> {
    gestures: BTreeMap<PointerId, Gesture<D, C>>,
    pending: Option<PointerId>,
    active: usize,
}

impl<D, C> Default for Registry<D, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, C> core::fmt::Debug for Registry<D, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("gestures", &self.gestures)
            .field("pending", &self.pending)
            .field("active", &self.active)
            .finish()
    }
}

impl<D, C> Registry<D, C> {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            gestures: BTreeMap::new(),
            pending: None,
            active: 0,
        }
    }

    /// Number of live gestures, pressed or awaiting completion.
    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    /// True if no gesture is live.
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Whether `id` currently drives a gesture.
    pub fn contains(&self, id: PointerId) -> bool {
        self.gestures.contains_key(&id)
    }

    /// The gesture driven by `id`.
    pub fn get(&self, id: PointerId) -> Option<&Gesture<D, C>> {
        self.gestures.get(&id)
    }

    /// The gesture driven by `id`, mutably.
    pub fn get_mut(&mut self, id: PointerId) -> Option<&mut Gesture<D, C>> {
        self.gestures.get_mut(&id)
    }

    /// Live pointer identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.gestures.keys().copied()
    }

    /// Store `gesture` under its identifier, returning the gesture it displaced.
    pub fn insert(&mut self, gesture: Gesture<D, C>) -> Option<Gesture<D, C>> {
        self.gestures.insert(gesture.identifier(), gesture)
    }

    /// Remove the gesture driven by `id`. Clears the pending marker if it
    /// pointed at `id`.
    pub fn remove(&mut self, id: PointerId) -> Option<Gesture<D, C>> {
        if self.pending == Some(id) {
            self.pending = None;
        }
        self.gestures.remove(&id)
    }

    /// The identifier awaiting hand-off, if any.
    pub fn pending(&self) -> Option<PointerId> {
        self.pending
    }

    /// Mark `id` as released and available for hand-off.
    pub fn mark_pending(&mut self, id: PointerId) {
        self.pending = Some(id);
    }

    /// Move the gesture driven by `from` to `to` and clear the pending marker
    /// if it pointed at `from`.
    ///
    /// Returns `None` without changes if `from` is unknown or `to` already
    /// drives a different gesture.
    pub fn hand_off(&mut self, from: PointerId, to: PointerId) -> Option<&mut Gesture<D, C>> {
        if from != to && self.gestures.contains_key(&to) {
            return None;
        }
        let mut gesture = self.gestures.remove(&from)?;
        if self.pending == Some(from) {
            self.pending = None;
        }
        gesture.hand_off(to);
        Some(self.gestures.entry(to).or_insert(gesture))
    }

    /// Number of pressed gestures.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Count one more pressed gesture, returning the count before it.
    pub fn acquire(&mut self) -> usize {
        let before = self.active;
        self.active += 1;
        before
    }

    /// Count one fewer pressed gesture, never dropping below zero.
    pub fn release(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    /// Earliest completion deadline among live gestures.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.gestures.values().filter_map(Gesture::deadline).min()
    }

    /// The gesture whose deadline is earliest and no later than `now`.
    ///
    /// Equal deadlines resolve to the lowest identifier.
    pub fn next_due(&self, now: Duration) -> Option<PointerId> {
        self.gestures
            .iter()
            .filter_map(|(id, g)| g.deadline().filter(|d| *d <= now).map(|d| (d, *id)))
            .min()
            .map(|(_, id)| id)
    }

    /// Remove every gesture and reset the marker and counter.
    pub fn drain(&mut self) -> Vec<Gesture<D, C>> {
        self.pending = None;
        self.active = 0;
        core::mem::take(&mut self.gestures).into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatch;
    use crate::gesture::GesturePhase;
    use crate::types::{PointerInput, PointerType};
    use kurbo::Point;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn gesture(id: u64, t: u64) -> Gesture<(), ()> {
        let input = PointerInput::new(PointerId(id), PointerType::Touch, Point::ZERO, ms(t));
        Gesture::new(&input, Point::ZERO, (), (), Dispatch::new(), ms(600))
    }

    #[test]
    fn counter_saturates_at_zero() {
        let mut r: Registry<(), ()> = Registry::new();
        assert_eq!(r.acquire(), 0);
        assert_eq!(r.acquire(), 1);
        r.release();
        r.release();
        r.release();
        assert_eq!(r.active(), 0);
    }

    // Removing the pending gesture clears the marker; removing another does not.
    #[test]
    fn remove_clears_matching_pending() {
        let mut r = Registry::new();
        r.insert(gesture(1, 0));
        r.insert(gesture(2, 0));
        r.mark_pending(PointerId(1));
        assert!(r.remove(PointerId(2)).is_some());
        assert_eq!(r.pending(), Some(PointerId(1)));
        assert!(r.remove(PointerId(1)).is_some());
        assert_eq!(r.pending(), None);
        assert!(r.is_empty());
    }

    #[test]
    fn hand_off_rekeys_gesture() {
        let mut r = Registry::new();
        let mut g = gesture(1, 0);
        g.touch(ms(100));
        g.release();
        r.insert(g);
        r.mark_pending(PointerId(1));

        let moved = r.hand_off(PointerId(1), PointerId(7)).unwrap();
        assert_eq!(moved.identifier(), PointerId(7));
        assert_eq!(moved.phase(), GesturePhase::Pressed);
        assert_eq!(moved.deadline(), Some(ms(700)));
        assert!(!r.contains(PointerId(1)));
        assert!(r.contains(PointerId(7)));
        assert_eq!(r.pending(), None);
        assert_eq!(r.len(), 1);
    }

    // The target slot must be free or be the gesture itself.
    #[test]
    fn hand_off_refuses_occupied_slot() {
        let mut r = Registry::new();
        r.insert(gesture(1, 0));
        r.insert(gesture(2, 0));
        r.mark_pending(PointerId(1));
        assert!(r.hand_off(PointerId(1), PointerId(2)).is_none());
        assert_eq!(r.pending(), Some(PointerId(1)));
        assert!(r.hand_off(PointerId(1), PointerId(1)).is_some());
        assert_eq!(r.pending(), None);
        assert!(r.hand_off(PointerId(9), PointerId(3)).is_none());
    }

    #[test]
    fn due_gestures_come_out_in_deadline_order() {
        let mut r = Registry::new();
        for (id, t) in [(1, 300), (2, 100), (3, 100), (4, 900)] {
            let mut g = gesture(id, 0);
            g.touch(ms(t));
            r.insert(g);
        }
        assert_eq!(r.next_deadline(), Some(ms(700)));
        assert_eq!(r.next_due(ms(699)), None);
        assert_eq!(r.next_due(ms(1_000)), Some(PointerId(2)));
        r.get_mut(PointerId(2)).unwrap().fire(ms(1_000));
        assert_eq!(r.next_due(ms(1_000)), Some(PointerId(3)));
        r.get_mut(PointerId(3)).unwrap().fire(ms(1_000));
        assert_eq!(r.next_due(ms(1_000)), Some(PointerId(1)));
        assert_eq!(r.next_deadline(), Some(ms(900)));
    }

    #[test]
    fn drain_resets_everything() {
        let mut r = Registry::new();
        r.insert(gesture(1, 0));
        r.insert(gesture(2, 0));
        r.acquire();
        r.mark_pending(PointerId(2));
        assert_eq!(r.drain().len(), 2);
        assert!(r.is_empty());
        assert_eq!(r.pending(), None);
        assert_eq!(r.active(), 0);
    }
}
