// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal decision for a released gesture.
//!
//! ## Units
//!
//! Everything is normalized by the screen extent along the axis being judged:
//! translation `t / extent`, and velocity `clamp(v / extent, ±1.6)`. An axis
//! dismisses when
//!
//! ```text
//! t / extent + v_n * impact > 0.5
//! ```
//!
//! with both components measured positive in the axis' dismiss direction. With
//! `impact = 0` this is exactly "travelled more than half the screen toward
//! dismissal".

use kurbo::{Size, Vec2};

use crate::types::{DirectionSet, GestureAxis};

/// Bound on normalized velocity, in screen extents per second.
pub const MAX_NORMALIZED_VELOCITY: f64 = 1.6;

/// Normalized travel past which an axis dismisses.
pub const DISMISS_THRESHOLD: f64 = 0.5;

/// `v / extent`, clamped to [`MAX_NORMALIZED_VELOCITY`].
///
/// Returns `0` when `extent` is not positive or `v` is NaN.
pub fn normalize_velocity(v: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 || v.is_nan() {
        return 0.0;
    }
    (v / extent).clamp(-MAX_NORMALIZED_VELOCITY, MAX_NORMALIZED_VELOCITY)
}

/// Outcome of [`determine_dismissal`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DismissDecision {
    /// At least one eligible axis crossed the threshold.
    pub should_dismiss: bool,
    /// The axis with the highest score, dismissing or not.
    pub axis: Option<GestureAxis>,
    /// Normalized velocity along `axis`, positive toward dismissal.
    pub velocity: f64,
}

/// Decide whether a gesture released with `translation` and `velocity` dismisses.
///
/// Only axes in `directions` are eligible, and each only in its own dismiss
/// direction. When several axes qualify, the one with the highest score wins.
pub fn determine_dismissal(
    translation: Vec2,
    velocity: Vec2,
    screen: Size,
    directions: DirectionSet,
    impact: f64,
) -> DismissDecision {
    let mut best: Option<(f64, GestureAxis, f64)> = None;
    for axis in directions.axes() {
        let extent = axis.extent(screen);
        if extent.is_nan() || extent <= 0.0 {
            continue;
        }
        let t = axis.component(translation) / extent;
        let v = normalize_velocity(axis.component(velocity), extent);
        let score = t + v * impact;
        if best.is_none_or(|(s, _, _)| score > s) {
            best = Some((score, axis, v));
        }
    }
    let Some((score, axis, v)) = best else {
        return DismissDecision::default();
    };
    let decision = DismissDecision {
        should_dismiss: score > DISMISS_THRESHOLD,
        axis: Some(axis),
        velocity: v,
    };
    tracing::debug!(
        target: "segue::gesture",
        axis = ?axis,
        score,
        dismiss = decision.should_dismiss,
        "dismissal decided"
    );
    decision
}
