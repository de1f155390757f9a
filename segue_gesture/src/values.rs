// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen gesture values.
//!
//! Every field of [`GestureValues`] is a [`Tracked`] cell with its own change
//! version, so an observer can re-run only when the fields it reads change.
//! Writes that store an equal value do not bump the version.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use kurbo::{Size, Vec2};

use crate::types::GestureAxis;

/// A value with a change counter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tracked<T> {
    value: T,
    version: u64,
}

impl<T: Copy + PartialEq> Tracked<T> {
    /// A cell holding `value` at version 0.
    pub const fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    /// Store `value`; returns `true` (and bumps the version) if it differs.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version = self.version.wrapping_add(1);
        true
    }

    /// Number of changes observed so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Live gesture state for one screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureValues {
    x: Tracked<f64>,
    y: Tracked<f64>,
    normalized_x: Tracked<f64>,
    normalized_y: Tracked<f64>,
    dismissing: Tracked<bool>,
    dragging: Tracked<bool>,
    direction: Tracked<Option<GestureAxis>>,
}

impl GestureValues {
    /// Raw horizontal translation.
    pub fn x(&self) -> &Tracked<f64> {
        &self.x
    }

    /// Raw vertical translation.
    pub fn y(&self) -> &Tracked<f64> {
        &self.y
    }

    /// Horizontal translation divided by the screen width, in `-1..=1`.
    pub fn normalized_x(&self) -> &Tracked<f64> {
        &self.normalized_x
    }

    /// Vertical translation divided by the screen height, in `-1..=1`.
    pub fn normalized_y(&self) -> &Tracked<f64> {
        &self.normalized_y
    }

    /// Set once a released gesture crosses the dismiss threshold.
    pub fn dismissing(&self) -> &Tracked<bool> {
        &self.dismissing
    }

    /// True while a captured touch is down.
    pub fn dragging(&self) -> &Tracked<bool> {
        &self.dragging
    }

    /// Axis of the captured touch, if any.
    pub fn direction(&self) -> &Tracked<Option<GestureAxis>> {
        &self.direction
    }

    /// Raw translation as a vector.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x.get(), self.y.get())
    }

    /// Write the raw translation and its normalized form for a screen of size `screen`.
    pub fn set_translation(&mut self, translation: Vec2, screen: Size) {
        self.x.set(translation.x);
        self.y.set(translation.y);
        self.normalized_x.set(normalize(translation.x, screen.width));
        self.normalized_y.set(normalize(translation.y, screen.height));
    }

    /// Mark whether a captured touch is down.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging.set(dragging);
    }

    /// Record the axis of the captured touch.
    pub fn set_direction(&mut self, direction: Option<GestureAxis>) {
        self.direction.set(direction);
    }

    /// Only the dismissal decision and animation completion may touch this flag.
    pub(crate) fn set_dismissing(&mut self, dismissing: bool) {
        self.dismissing.set(dismissing);
    }

    /// Return every field to its default, bumping versions of fields that change.
    pub fn reset(&mut self) {
        self.set_translation(Vec2::ZERO, Size::ZERO);
        self.dismissing.set(false);
        self.dragging.set(false);
        self.direction.set(None);
    }

    /// Plain copy of the current values.
    pub fn snapshot(&self) -> GestureSnapshot {
        GestureSnapshot {
            x: self.x.get(),
            y: self.y.get(),
            normalized_x: self.normalized_x.get(),
            normalized_y: self.normalized_y.get(),
            dismissing: self.dismissing.get(),
            dragging: self.dragging.get(),
            direction: self.direction.get(),
        }
    }
}

fn normalize(value: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        (value / extent).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Plain copy of [`GestureValues`], as handed to interpolators.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureSnapshot {
    /// Raw horizontal translation.
    pub x: f64,
    /// Raw vertical translation.
    pub y: f64,
    /// Horizontal translation over screen width.
    pub normalized_x: f64,
    /// Vertical translation over screen height.
    pub normalized_y: f64,
    /// The screen is being dismissed by a gesture.
    pub dismissing: bool,
    /// A captured touch is down.
    pub dragging: bool,
    /// Axis of the captured touch.
    pub direction: Option<GestureAxis>,
}

impl GestureSnapshot {
    /// Raw translation as a vector.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Gesture values keyed by screen.
///
/// Reads for unknown or cleared screens return defaults.
pub struct GestureStore<K> {
    values: HashMap<K, GestureValues>,
}

impl<K> Debug for GestureStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureStore")
            .field("screens", &self.values.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for GestureStore<K> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> GestureStore<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values for `key`, created with defaults on first access.
    pub fn ensure(&mut self, key: K) -> &mut GestureValues {
        self.values.entry(key).or_default()
    }

    /// Values for `key`, if they exist.
    pub fn get(&self, key: K) -> Option<&GestureValues> {
        self.values.get(&key)
    }

    /// Snapshot for `key`; defaults for unknown screens.
    pub fn snapshot(&self, key: K) -> GestureSnapshot {
        self.values
            .get(&key)
            .map(GestureValues::snapshot)
            .unwrap_or_default()
    }

    /// Reset `key`'s values to defaults, keeping the entry.
    pub fn reset(&mut self, key: K) {
        if let Some(values) = self.values.get_mut(&key) {
            values.reset();
        }
    }

    /// Drop `key`'s entry. Returns `true` if one existed.
    pub fn clear(&mut self, key: K) -> bool {
        let removed = self.values.remove(&key).is_some();
        if removed {
            tracing::trace!(target: "segue::gesture", screen = ?key, "gesture values cleared");
        }
        removed
    }

    /// Number of screens with values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no screen has values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size::new(400.0, 800.0);

    #[test]
    fn tracked_bumps_only_on_change() {
        let mut cell = Tracked::new(1.0);
        assert!(!cell.set(1.0));
        assert_eq!(cell.version(), 0);
        assert!(cell.set(2.0));
        assert_eq!(cell.get(), 2.0);
        assert_eq!(cell.version(), 1);
    }

    #[test]
    fn fields_version_independently() {
        let mut values = GestureValues::default();
        values.set_translation(Vec2::new(0.0, 200.0), SCREEN);
        assert_eq!(values.x().version(), 0);
        assert_eq!(values.y().version(), 1);
        assert_eq!(values.normalized_y().get(), 0.25);
        assert_eq!(values.dragging().version(), 0);
    }

    #[test]
    fn normalized_is_clamped() {
        let mut values = GestureValues::default();
        values.set_translation(Vec2::new(-900.0, 1600.0), SCREEN);
        assert_eq!(values.normalized_x().get(), -1.0);
        assert_eq!(values.normalized_y().get(), 1.0);
        values.set_translation(Vec2::new(5.0, 5.0), Size::ZERO);
        assert_eq!(values.normalized_x().get(), 0.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut values = GestureValues::default();
        values.set_translation(Vec2::new(10.0, 20.0), SCREEN);
        values.set_dragging(true);
        values.set_dismissing(true);
        values.set_direction(Some(GestureAxis::Vertical));
        values.reset();
        assert_eq!(values.snapshot(), GestureSnapshot::default());
    }

    #[test]
    fn store_tolerates_unknown_and_cleared_keys() {
        let mut store = GestureStore::<u32>::new();
        assert_eq!(store.snapshot(7), GestureSnapshot::default());
        store.ensure(7).set_dragging(true);
        assert!(store.snapshot(7).dragging);
        store.reset(7);
        assert!(!store.snapshot(7).dragging);
        assert!(store.clear(7));
        assert!(!store.clear(7));
        assert!(store.get(7).is_none());
        assert_eq!(store.snapshot(7), GestureSnapshot::default());
    }
}
