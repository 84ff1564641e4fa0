// Copyright 2025 the Inkstroke Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named listener table keyed by event kind.
//!
//! ## Typenames
//!
//! Listeners are addressed with typenames of the form `kind` or `kind.name`,
//! several separated by whitespace. The kind must be one of `start`, `move`,
//! `up`, or `end`; the name lets independent listeners share a kind.
//!
//! - Registering an existing `(kind, name)` replaces it; the new listener moves
//!   to the end of the call order.
//! - [`Dispatch::off`] with `.name` removes that name from every kind.
//! - [`Dispatch::get`] returns the current listener without changing anything.
//!
//! ```
//! use inkstroke::dispatch::Dispatch;
//! use inkstroke::types::StrokeEvent;
//! use std::rc::Rc;
//!
//! let mut d: Dispatch<()> = Dispatch::new();
//! d.on("start.ink move.ink", Rc::new(|_e: &StrokeEvent<'_>, _d: &()| {}))
//!     .unwrap();
//! assert!(d.get("move.ink").unwrap().is_some());
//! d.off(".ink").unwrap();
//! assert!(d.is_empty());
//! ```
//!
//! A gesture clones the table when it starts, so later registrations only
//! affect gestures started afterwards. Clones share the listener closures.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::DispatchError;
use crate::types::{EventKind, StrokeEvent};

/// A shared listener callback receiving the event and the gesture's datum.
pub type Listener<D> = Rc<dyn Fn(&StrokeEvent<'_>, &D)>;

/// Ordered multimap from [`EventKind`] to named listeners.
pub struct Dispatch<D> {
    slots: [Vec<(String, Listener<D>)>; 4],
}

impl<D> Clone for Dispatch<D> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<D> Default for Dispatch<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> core::fmt::Debug for Dispatch<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut m = f.debug_map();
        for kind in EventKind::ALL {
            let names: Vec<&str> = self.slots[kind.index()]
                .iter()
                .map(|(n, _)| n.as_str())
                .collect();
            m.entry(&kind.as_str(), &names);
        }
        m.finish()
    }
}

// Split into `(kind, name)` pairs; `kind` is `None` for `.name`.
fn parse_typenames(typenames: &str) -> Result<Vec<(Option<EventKind>, &str)>, DispatchError> {
    typenames
        .split_whitespace()
        .map(|t| {
            let (kind, name) = t.split_once('.').unwrap_or((t, ""));
            if kind.is_empty() {
                return Ok((None, name));
            }
            EventKind::parse(kind)
                .map(|k| (Some(k), name))
                .ok_or_else(|| DispatchError::UnknownKind(kind.to_string()))
        })
        .collect()
}

impl<D> Dispatch<D> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            slots: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Register `listener` for every typename in `typenames`.
    ///
    /// Typenames without a kind (`.name`) are ignored when registering.
    /// Nothing is changed if any typename names an unknown kind.
    pub fn on(&mut self, typenames: &str, listener: Listener<D>) -> Result<(), DispatchError> {
        for (kind, name) in parse_typenames(typenames)? {
            let Some(kind) = kind else { continue };
            let slot = &mut self.slots[kind.index()];
            slot.retain(|(n, _)| n != name);
            slot.push((name.to_string(), Rc::clone(&listener)));
        }
        Ok(())
    }

    /// Remove the listeners addressed by `typenames`.
    ///
    /// `.name` removes `name` from every kind.
    pub fn off(&mut self, typenames: &str) -> Result<(), DispatchError> {
        for (kind, name) in parse_typenames(typenames)? {
            match kind {
                Some(kind) => self.slots[kind.index()].retain(|(n, _)| n != name),
                None => {
                    for slot in &mut self.slots {
                        slot.retain(|(n, _)| n != name);
                    }
                }
            }
        }
        Ok(())
    }

    /// The first registered listener matching `typenames`, if any.
    pub fn get(&self, typenames: &str) -> Result<Option<Listener<D>>, DispatchError> {
        for (kind, name) in parse_typenames(typenames)? {
            let Some(kind) = kind else { continue };
            if let Some((_, l)) = self.slots[kind.index()].iter().find(|(n, _)| n == name) {
                return Ok(Some(Rc::clone(l)));
            }
        }
        Ok(None)
    }

    /// Number of listeners registered for `kind`.
    pub fn len(&self, kind: EventKind) -> usize {
        self.slots[kind.index()].len()
    }

    /// True if no listener is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Invoke every listener for `kind`, synchronously, in registration order.
    pub fn call(&self, kind: EventKind, event: &StrokeEvent<'_>, datum: &D) {
        for (_, listener) in &self.slots[kind.index()] {
            listener(event, datum);
        }
    }
}
