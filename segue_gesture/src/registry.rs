// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis ownership registry.
//!
//! ## Overview
//!
//! Decides which screen, if any, receives a swipe on a given axis.
//! Each `(navigator, axis)` pair holds a stack of claiming screens; the top of
//! the stack is the owner.
//!
//! ## Stack rules
//!
//! - [`claim`](AxisRegistry::claim) pushes. A screen that already claims the
//!   axis moves to the top instead of appearing twice.
//! - [`release`](AxisRegistry::release) removes the screen wherever it sits,
//!   so out-of-order unmounts keep the remaining order. Ownership falls back to
//!   the nearest surviving claim, never past it and never to nothing while
//!   claims remain.
//! - Axes are independent, including `Vertical` and `VerticalInverted`.
//!
//! ## Inheritance
//!
//! [`resolve`](AxisRegistry::resolve) starts at a navigator and walks its
//! ancestry through a [`NavigatorParent`] until some navigator has an owner for
//! the axis. A descendant's claim therefore shadows every ancestor claim on the
//! same axis, whether or not the descendant can currently move.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::types::{DirectionSet, GestureAxis, NavigatorParent};

/// A resolved ownership: `screen` in `navigator` owns `axis`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Claim<N, K> {
    /// Navigator whose stack holds the claim.
    pub navigator: N,
    /// Claimed axis.
    pub axis: GestureAxis,
    /// Owning screen.
    pub screen: K,
}

type ClaimStack<K> = SmallVec<[K; 4]>;

/// Per-navigator, per-axis claim stacks.
pub struct AxisRegistry<N, K> {
    stacks: HashMap<(N, GestureAxis), ClaimStack<K>>,
}

impl<N: Debug, K: Debug> Debug for AxisRegistry<N, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisRegistry")
            .field("stacks", &self.stacks)
            .finish()
    }
}

impl<N, K> Default for AxisRegistry<N, K> {
    fn default() -> Self {
        Self {
            stacks: HashMap::new(),
        }
    }
}

impl<N, K> AxisRegistry<N, K>
where
    N: Copy + Eq + Hash + Debug,
    K: Copy + Eq + Debug,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `screen` atop the claim stack for `(navigator, axis)`.
    pub fn claim(&mut self, navigator: N, axis: GestureAxis, screen: K) {
        let stack = self.stacks.entry((navigator, axis)).or_default();
        if let Some(pos) = stack.iter().position(|k| *k == screen) {
            stack.remove(pos);
        }
        stack.push(screen);
        tracing::trace!(
            target: "segue::registry",
            navigator = ?navigator,
            axis = ?axis,
            screen = ?screen,
            depth = stack.len(),
            "axis claimed"
        );
    }

    /// Claim every axis in `directions`, each independently.
    pub fn claim_directions(&mut self, navigator: N, directions: DirectionSet, screen: K) {
        for axis in directions.axes() {
            self.claim(navigator, axis, screen);
        }
    }

    /// Remove `screen` from the claim stack for `(navigator, axis)`.
    ///
    /// Returns `false` if the screen held no claim there.
    pub fn release(&mut self, navigator: N, axis: GestureAxis, screen: K) -> bool {
        let Some(stack) = self.stacks.get_mut(&(navigator, axis)) else {
            return false;
        };
        let Some(pos) = stack.iter().position(|k| *k == screen) else {
            return false;
        };
        stack.remove(pos);
        let owner = stack.last().copied();
        if stack.is_empty() {
            self.stacks.remove(&(navigator, axis));
        }
        tracing::trace!(
            target: "segue::registry",
            navigator = ?navigator,
            axis = ?axis,
            screen = ?screen,
            owner = ?owner,
            "axis released"
        );
        true
    }

    /// Release every axis `screen` claims in `navigator`. Returns the released axes.
    pub fn release_screen(&mut self, navigator: N, screen: K) -> DirectionSet {
        GestureAxis::ALL
            .into_iter()
            .filter(|axis| self.release(navigator, *axis, screen))
            .collect()
    }

    /// Drop every claim stack belonging to `navigator`.
    pub fn release_navigator(&mut self, navigator: N) {
        self.stacks.retain(|(n, _), _| *n != navigator);
    }

    /// Top of the claim stack for `(navigator, axis)`.
    pub fn owner(&self, navigator: N, axis: GestureAxis) -> Option<K> {
        self.stacks
            .get(&(navigator, axis))
            .and_then(|stack| stack.last().copied())
    }

    /// The claim stack for `(navigator, axis)`, oldest first.
    pub fn claims(&self, navigator: N, axis: GestureAxis) -> &[K] {
        self.stacks
            .get(&(navigator, axis))
            .map(|stack| stack.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve the owner of `axis` starting at `navigator` and walking its ancestry.
    ///
    /// The first navigator with any claim on the axis wins.
    pub fn resolve(
        &self,
        navigator: N,
        axis: GestureAxis,
        parents: &impl NavigatorParent<N>,
    ) -> Option<Claim<N, K>> {
        let mut current = navigator;
        // Caller guarantees acyclic ancestry.
        loop {
            if let Some(screen) = self.owner(current, axis) {
                return Some(Claim {
                    navigator: current,
                    axis,
                    screen,
                });
            }
            current = parents.parent_of(&current)?;
        }
    }

    /// Axes whose resolution from `navigator` lands on `screen`.
    pub fn resolved_axes(
        &self,
        navigator: N,
        screen: K,
        parents: &impl NavigatorParent<N>,
    ) -> DirectionSet {
        GestureAxis::ALL
            .into_iter()
            .filter(|axis| {
                self.resolve(navigator, *axis, parents)
                    .is_some_and(|claim| claim.screen == screen)
            })
            .collect()
    }

    /// True when no claims are held.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
