// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen handle over the tree.

use kurbo::Vec2;
use segue_bounds::{BoundTag, Measure, MeasuredBounds};
use segue_gesture::{DirectionSet, GestureAction, GesturePhase, GestureSnapshot, PanEvent, ScrollState};

use crate::error::Result;
use crate::style::StylePatchMap;
use crate::tree::TransitionTree;
use crate::types::{InterpolatorState, NavigatorId, ScreenKey};

/// Point-in-time view of one screen's transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenAnimation {
    /// Own progress.
    pub progress: f64,
    /// Gesture offset, animated back to zero on release.
    pub gesture_offset: Vec2,
    /// The screen is leaving.
    pub closing: bool,
    /// Progress or offset is animating.
    pub animating: bool,
    /// Recognizer state.
    pub phase: GesturePhase,
    /// Snap point the screen rests at, for sheets.
    pub snap_index: Option<usize>,
    /// Gesture values.
    pub gesture: GestureSnapshot,
    /// Interpolator state.
    pub interpolator: InterpolatorState,
}

/// Everything a screen's host view needs, bound to that screen.
///
/// Obtained from [`TransitionTree::session`]. Every call goes through the tree,
/// so a session outliving its screen (after [`dismiss`](Self::dismiss)
/// completes) reports [`TransitionError::UnknownScreen`](crate::TransitionError::UnknownScreen).
#[derive(Debug)]
pub struct TransitionSession<'a> {
    tree: &'a mut TransitionTree,
    key: ScreenKey,
}

impl<'a> TransitionSession<'a> {
    pub(crate) fn new(tree: &'a mut TransitionTree, key: ScreenKey) -> Self {
        Self { tree, key }
    }

    /// The screen.
    pub fn key(&self) -> ScreenKey {
        self.key
    }

    /// The screen's navigator.
    pub fn navigator(&self) -> Result<NavigatorId> {
        self.tree.navigator_of(self.key)
    }

    /// See [`TransitionTree::handle_pan`].
    pub fn handle_pan(&mut self, event: PanEvent) -> Result<GestureAction> {
        self.tree.handle_pan(self.key, event)
    }

    /// See [`TransitionTree::set_scroll_state`].
    pub fn set_scroll_state(&mut self, scroll: Option<ScrollState>) -> Result<()> {
        self.tree.set_scroll_state(self.key, scroll)
    }

    /// See [`TransitionTree::owned_axes`].
    pub fn owned_axes(&self) -> Result<DirectionSet> {
        self.tree.owned_axes(self.key)
    }

    /// See [`TransitionTree::frame`].
    pub fn frame(&mut self) -> Result<StylePatchMap> {
        self.tree.frame(self.key)
    }

    /// See [`TransitionTree::screen_animation`].
    pub fn animation(&self) -> Result<ScreenAnimation> {
        self.tree.screen_animation(self.key)
    }

    /// See [`TransitionTree::set_bounds`].
    pub fn set_bounds(&mut self, tag: impl Into<BoundTag>, measured: MeasuredBounds) -> Result<()> {
        self.tree.set_bounds(self.key, tag, measured)
    }

    /// See [`TransitionTree::measure`].
    pub fn measure<V>(
        &mut self,
        tag: impl Into<BoundTag>,
        host: &impl Measure<V>,
        view: &V,
    ) -> Result<Option<MeasuredBounds>> {
        self.tree.measure(self.key, tag, host, view)
    }

    /// See [`TransitionTree::request_measurement`].
    pub fn request_measurement(&mut self, tag: impl Into<BoundTag>) -> Result<()> {
        self.tree.request_measurement(self.key, tag)
    }

    /// See [`TransitionTree::complete_measurement`].
    pub fn complete_measurement(&mut self, tag: &str, measured: MeasuredBounds) -> Result<bool> {
        self.tree.complete_measurement(self.key, tag, measured)
    }

    /// Create a navigator nested inside this screen.
    pub fn add_navigator(&mut self) -> Result<NavigatorId> {
        self.tree.add_navigator(self.key)
    }

    /// See [`TransitionTree::dismiss`].
    pub fn dismiss(&mut self) -> Result<()> {
        self.tree.dismiss(self.key)
    }
}
