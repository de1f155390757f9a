// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds matching: resolving a tag across the screens taking part in a transition.
//!
//! ## Roles
//!
//! A context is built for one styled screen (`current`) together with its
//! neighbours in the stack. When a `next` screen exists, the current screen is
//! being covered (or revealed), so it is the [`Source`](Role::Source) and the
//! pair is `current → next`. Otherwise the current screen is entering or
//! focused, so it is the [`Destination`](Role::Destination) and the pair is
//! `previous → current`.
//!
//! ## Progress
//!
//! The context carries the combined stack progress (`0..=2`). The destination
//! uses `progress` as its local progress; the source uses `progress - 1`.
//!
//! ## Missing measurements
//!
//! Any missing rectangle resolves to [`BoundStyle::IDENTITY`] rather than an
//! error; the interpolation pipeline hides the unmeasured frame.

use std::fmt::Debug;
use std::hash::Hash;

use kurbo::{Point, Rect, Size};

use crate::navigation::Navigation;
use crate::query::{BoundsQuery, Target};
use crate::store::BoundStore;
use crate::transform::{BoundStyle, BoundsFrame, Role, compute};
use crate::types::MeasuredBounds;

/// Read-only view of the bound store scoped to one styled screen.
#[derive(Debug)]
pub struct BoundsContext<'a, K> {
    store: &'a BoundStore<K>,
    current: K,
    previous: Option<K>,
    next: Option<K>,
    progress: f64,
    screen: Size,
}

impl<K: Copy> Clone for BoundsContext<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Copy> Copy for BoundsContext<'_, K> {}

impl<'a, K: Copy + Eq + Hash + Debug> BoundsContext<'a, K> {
    /// Context for `current` alone, at progress `0` on a screen of size `screen`.
    pub fn new(store: &'a BoundStore<K>, current: K, screen: Size) -> Self {
        Self {
            store,
            current,
            previous: None,
            next: None,
            progress: 0.0,
            screen,
        }
    }

    /// Set the screen below `current`.
    #[must_use]
    pub fn with_previous(mut self, previous: Option<K>) -> Self {
        self.previous = previous;
        self
    }

    /// Set the screen above `current`.
    #[must_use]
    pub fn with_next(mut self, next: Option<K>) -> Self {
        self.next = next;
        self
    }

    /// Set the combined stack progress.
    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// The styled screen.
    pub fn current(&self) -> K {
        self.current
    }

    /// Screen size used for [`Target::Fullscreen`].
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Combined stack progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Side of the transition the styled screen is on.
    pub fn role(&self) -> Role {
        if self.next.is_some() {
            Role::Source
        } else {
            Role::Destination
        }
    }

    /// The screen whose transition is driving this frame: `next` if present,
    /// otherwise `current`.
    pub fn active(&self) -> K {
        self.next.unwrap_or(self.current)
    }

    /// Progress in `0..=1` relative to the styled screen's role.
    pub fn local_progress(&self) -> f64 {
        match self.role() {
            Role::Destination => self.progress.clamp(0.0, 1.0),
            Role::Source => (self.progress - 1.0).clamp(0.0, 1.0),
        }
    }

    /// Screens consulted by [`get`](Self::get): active, then previous, then next.
    pub fn lookup_order(&self) -> impl Iterator<Item = K> + use<K> {
        let active = self.active();
        let next = self.next.filter(|n| *n != active);
        [Some(active), self.previous, next].into_iter().flatten()
    }

    /// Measurement of `tag` from the first screen in [`lookup_order`](Self::lookup_order) that has one.
    pub fn get(&self, tag: &str) -> Option<MeasuredBounds> {
        self.store.find(tag, self.lookup_order()).map(|(_, m)| m)
    }

    /// Resolve the start/end pair for `query`, or `None` if a side is missing.
    pub fn raw(&self, query: &BoundsQuery) -> Option<BoundsFrame> {
        let space = query.effective_space();
        let tag = query.id.as_str();
        let role = self.role();
        let (source, destination) = match role {
            Role::Destination => (self.previous?, self.current),
            Role::Source => (self.current, self.next?),
        };
        let start = self.store.get_bounds(source, tag)?.rect(space);
        let end = match query.target {
            Target::Bound => self.store.get_bounds(destination, tag)?.rect(space),
            Target::Fullscreen => Rect::from_origin_size(Point::ZERO, self.screen),
            Target::Rect(rect) => rect,
        };
        Some(BoundsFrame::new(role, start, end, self.local_progress()))
    }

    /// Style for `query` at the current progress.
    ///
    /// Returns [`BoundStyle::IDENTITY`] when a measurement is missing.
    pub fn bounds(&self, query: &BoundsQuery) -> BoundStyle {
        match self.raw(query) {
            Some(frame) => compute(&frame, query),
            None => {
                tracing::trace!(
                    target: "segue::bounds",
                    screen = ?self.current,
                    tag = %query.id,
                    "bounds unresolved, using identity"
                );
                BoundStyle::IDENTITY
            }
        }
    }

    /// Higher-level navigation helpers built on the same rectangles.
    pub fn navigation(&self) -> Navigation<'a, K> {
        Navigation::new(*self)
    }
}
