// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen registry of last-measured rectangles.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::types::{BoundTag, Measure, MeasuredBounds};

#[derive(Clone, Debug, Default)]
struct ScreenBounds {
    entries: HashMap<BoundTag, MeasuredBounds>,
    pending: HashSet<BoundTag>,
    // Bumped whenever an entry for this screen changes value.
    epoch: u64,
}

/// Registry of measured bounds keyed by `(screen, tag)`.
///
/// ## Semantics
///
/// - [`set_bounds`](Self::set_bounds) overwrites; writing an identical value is a no-op.
/// - Once set, an entry lives until [`clear_screen`](Self::clear_screen) purges the screen.
/// - Reads for unknown or cleared screens return `None`; they never panic.
/// - Each screen carries an epoch that changes whenever one of its entries
///   changes, so downstream caches can tell when a screen's geometry moved.
///
/// Measurement requests issued ahead of time (for example right before a
/// press-navigate) are tracked as pending; clearing the screen cancels them,
/// and a late result for a cancelled request is dropped.
#[derive(Clone)]
pub struct BoundStore<K> {
    screens: HashMap<K, ScreenBounds>,
    epoch: u64,
}

impl<K> Default for BoundStore<K> {
    fn default() -> Self {
        Self {
            screens: HashMap::new(),
            epoch: 0,
        }
    }
}

impl<K: Debug> Debug for BoundStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: usize = self.screens.values().map(|s| s.entries.len()).sum();
        let pending: usize = self.screens.values().map(|s| s.pending.len()).sum();
        f.debug_struct("BoundStore")
            .field("screens", &self.screens.len())
            .field("entries", &entries)
            .field("pending", &pending)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash + Debug> BoundStore<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `measured` for `(screen, tag)`, replacing any previous value.
    ///
    /// Also settles a pending request for the same pair.
    pub fn set_bounds(&mut self, screen: K, tag: impl Into<BoundTag>, measured: MeasuredBounds) {
        let tag = tag.into();
        let entry = self.screens.entry(screen).or_default();
        entry.pending.remove(tag.as_str());
        if entry.entries.get(tag.as_str()) == Some(&measured) {
            return;
        }
        tracing::trace!(
            target: "segue::bounds",
            screen = ?screen,
            tag = %tag,
            width = measured.width,
            height = measured.height,
            "bounds set"
        );
        entry.entries.insert(tag, measured);
        self.epoch += 1;
        entry.epoch = self.epoch;
    }

    /// Last measurement for `(screen, tag)`, if any.
    pub fn get_bounds(&self, screen: K, tag: &str) -> Option<MeasuredBounds> {
        self.screens.get(&screen)?.entries.get(tag).copied()
    }

    /// True if a measurement exists for `(screen, tag)`.
    pub fn has_bounds(&self, screen: K, tag: &str) -> bool {
        self.screens
            .get(&screen)
            .is_some_and(|s| s.entries.contains_key(tag))
    }

    /// Remove every tag and pending request for `screen`.
    ///
    /// Called exactly once when the screen unmounts. Returns the number of
    /// entries removed.
    pub fn clear_screen(&mut self, screen: K) -> usize {
        let Some(removed) = self.screens.remove(&screen) else {
            return 0;
        };
        if !removed.pending.is_empty() {
            tracing::debug!(
                target: "segue::bounds",
                screen = ?screen,
                cancelled = removed.pending.len(),
                "pending measurements cancelled"
            );
        }
        self.epoch += 1;
        removed.entries.len()
    }

    /// Mark `(screen, tag)` as awaiting a measurement.
    pub fn request_measurement(&mut self, screen: K, tag: impl Into<BoundTag>) {
        self.screens
            .entry(screen)
            .or_default()
            .pending
            .insert(tag.into());
    }

    /// Deliver the result of an earlier [`request_measurement`](Self::request_measurement).
    ///
    /// Returns `false` (and stores nothing) when the request is unknown, which
    /// is the case once the screen has been cleared.
    pub fn complete_measurement(&mut self, screen: K, tag: &str, measured: MeasuredBounds) -> bool {
        let requested = self
            .screens
            .get(&screen)
            .is_some_and(|s| s.pending.contains(tag));
        if !requested {
            tracing::trace!(
                target: "segue::bounds",
                screen = ?screen,
                tag,
                "late measurement dropped"
            );
            return false;
        }
        self.set_bounds(screen, tag, measured);
        true
    }

    /// True while a measurement for `(screen, tag)` is outstanding.
    pub fn is_pending(&self, screen: K, tag: &str) -> bool {
        self.screens
            .get(&screen)
            .is_some_and(|s| s.pending.contains(tag))
    }

    /// Measure `view` through the host primitive and store the result.
    ///
    /// Returns the measurement, or `None` when the host could not measure the
    /// view (the previous value, if any, is kept).
    pub fn measure<V>(
        &mut self,
        screen: K,
        tag: impl Into<BoundTag>,
        host: &impl Measure<V>,
        view: &V,
    ) -> Option<MeasuredBounds> {
        let measured = host.measure(view)?;
        self.set_bounds(screen, tag, measured);
        Some(measured)
    }

    /// Tags currently measured for `screen`.
    pub fn tags(&self, screen: K) -> impl Iterator<Item = &BoundTag> + '_ {
        self.screens
            .get(&screen)
            .into_iter()
            .flat_map(|s| s.entries.keys())
    }

    /// Change counter for `screen`; `0` for screens with no entries.
    pub fn screen_epoch(&self, screen: K) -> u64 {
        self.screens.get(&screen).map_or(0, |s| s.epoch)
    }

    /// Global change counter.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Find `tag` on the first screen of `order` that has it.
    pub fn find(
        &self,
        tag: &str,
        order: impl IntoIterator<Item = K>,
    ) -> Option<(K, MeasuredBounds)> {
        order
            .into_iter()
            .find_map(|screen| self.get_bounds(screen, tag).map(|m| (screen, m)))
    }

    /// Number of screens with at least one entry or pending request.
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
