// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen interpolators and the per-screen interpolation pipeline.
//!
//! Each frame the tree gathers an [`InterpolationProps`] for the styled screen
//! and hands it to the screen's [`ScreenInterpolator`]. The pipeline around the
//! call:
//!
//! - memoizes on the frame inputs (progress, closing flags, gesture values and
//!   bound epochs of the participating screens, layout and active bound), so an
//!   unchanged frame returns the cached map without invoking the interpolator;
//! - drops invalid patches with a warning;
//! - hides the screen's content for a single frame while the active shared
//!   bound has not been measured yet.

use kurbo::Size;
use segue_bounds::{BoundStore, BoundTag, BoundsContext};
use segue_gesture::GestureSnapshot;

use crate::style::{StyleKey, StylePatchMap};
use crate::types::{InterpolatorState, RouteParams, ScreenKey};

/// Produces a screen's styles from the current transition state.
///
/// Closures of the form `Fn(&InterpolationProps<'_>) -> StylePatchMap` implement
/// this trait.
pub trait ScreenInterpolator: Send + Sync {
    /// Compute the styles for one frame.
    fn interpolate(&self, props: &InterpolationProps<'_>) -> StylePatchMap;
}

impl<F> ScreenInterpolator for F
where
    F: Fn(&InterpolationProps<'_>) -> StylePatchMap + Send + Sync,
{
    fn interpolate(&self, props: &InterpolationProps<'_>) -> StylePatchMap {
        self(props)
    }
}

/// Transition state of one screen taking part in a frame.
#[derive(Copy, Clone, Debug)]
pub struct ScreenState<'a> {
    /// The screen.
    pub key: ScreenKey,
    /// Own progress: `0` offscreen, `1` (or its snap point) at rest.
    pub progress: f64,
    /// The screen is leaving.
    pub closing: bool,
    /// Progress or gesture offset is animating.
    pub animating: bool,
    /// Gesture values.
    pub gesture: GestureSnapshot,
    /// Route parameters.
    pub params: &'a RouteParams,
}

/// Layout information available to interpolators.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layouts {
    /// Screen size.
    pub screen: Size,
}

/// Input to [`ScreenInterpolator::interpolate`].
#[derive(Copy, Clone, Debug)]
pub struct InterpolationProps<'a> {
    /// Combined progress in `0..=2`: the styled screen's progress plus its
    /// `next` neighbour's.
    pub progress: f64,
    /// The styled screen.
    pub current: ScreenState<'a>,
    /// The screen below.
    pub previous: Option<ScreenState<'a>>,
    /// The screen above, when the styled screen is being covered.
    pub next: Option<ScreenState<'a>>,
    /// `next` if present, otherwise `current`.
    pub active: ScreenState<'a>,
    /// The styled screen is the top of its navigator and not leaving.
    pub focused: bool,
    /// Layouts.
    pub layouts: Layouts,
    /// Shared-bounds resolution scoped to this frame.
    pub bounds: BoundsContext<'a, ScreenKey>,
    /// Shared element the active screen transitions from.
    pub active_bound_id: Option<&'a BoundTag>,
    /// Gesture values of the active screen.
    pub gestures: GestureSnapshot,
}

impl InterpolationProps<'_> {
    /// Progress in `0..=1` relative to the styled screen's role: entering when
    /// there is no `next`, being covered otherwise.
    pub fn local_progress(&self) -> f64 {
        self.bounds.local_progress()
    }

    /// True when the styled screen is the one entering or leaving.
    pub fn is_active(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ScreenInputs {
    key: ScreenKey,
    progress: f64,
    closing: bool,
    animating: bool,
    gesture: GestureSnapshot,
    bounds_epoch: u64,
}

impl ScreenInputs {
    fn new(state: &ScreenState<'_>, store: &BoundStore<ScreenKey>) -> Self {
        Self {
            key: state.key,
            progress: state.progress,
            closing: state.closing,
            animating: state.animating,
            gesture: state.gesture,
            bounds_epoch: store.screen_epoch(state.key),
        }
    }
}

/// Everything an interpolator may read, reduced to comparable values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrameInputs {
    current: ScreenInputs,
    previous: Option<ScreenInputs>,
    next: Option<ScreenInputs>,
    focused: bool,
    layout: Size,
    active_bound: Option<BoundTag>,
}

impl FrameInputs {
    pub(crate) fn new(props: &InterpolationProps<'_>, store: &BoundStore<ScreenKey>) -> Self {
        Self {
            current: ScreenInputs::new(&props.current, store),
            previous: props.previous.map(|s| ScreenInputs::new(&s, store)),
            next: props.next.map(|s| ScreenInputs::new(&s, store)),
            focused: props.focused,
            layout: props.layouts.screen,
            active_bound: props.active_bound_id.cloned(),
        }
    }
}

/// Per-screen pipeline state.
#[derive(Debug, Default)]
pub(crate) struct Pipeline {
    state: InterpolatorState,
    inputs: Option<FrameInputs>,
    output: StylePatchMap,
    gate_spent: bool,
    runs: u64,
}

impl Pipeline {
    pub(crate) fn state(&self) -> InterpolatorState {
        self.state
    }

    /// Number of interpolator invocations so far.
    pub(crate) fn runs(&self) -> u64 {
        self.runs
    }

    pub(crate) fn run(
        &mut self,
        interpolator: Option<&dyn ScreenInterpolator>,
        props: &InterpolationProps<'_>,
        inputs: FrameInputs,
        bound_pending: bool,
    ) -> StylePatchMap {
        let Some(interpolator) = interpolator else {
            self.state = InterpolatorState::Undefined;
            self.inputs = None;
            self.output = StylePatchMap::new();
            return StylePatchMap::new();
        };

        let fresh = self.state == InterpolatorState::Defined && self.inputs.as_ref() == Some(&inputs);
        if !fresh {
            let mut output = interpolator.interpolate(props);
            for (key, error) in output.retain_valid() {
                tracing::warn!(
                    target: "segue::interpolator",
                    screen = ?props.current.key,
                    key = %key,
                    %error,
                    "dropping invalid style patch"
                );
            }
            self.output = output;
            self.inputs = Some(inputs);
            self.state = InterpolatorState::Defined;
            self.runs += 1;
        }

        let mut frame = self.output.clone();
        if bound_pending && !self.gate_spent {
            self.gate_spent = true;
            frame.entry(StyleKey::Content).opacity = Some(0.0);
            tracing::trace!(
                target: "segue::interpolator",
                screen = ?props.current.key,
                "hiding frame until shared bound is measured"
            );
        }
        frame
    }
}
