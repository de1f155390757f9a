// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap point resolution for sheet-style screens.
//!
//! A sheet rests at one of several progress values. When a drag is released,
//! the progress is projected forward by its velocity and the nearest snap point
//! is chosen. Progress `0` (fully dismissed) competes with the snap points when
//! the sheet may be dismissed.

/// Where a released sheet should go.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapTarget {
    /// Progress to animate to.
    pub progress: f64,
    /// Index into the snap points, if the target is one.
    pub index: Option<usize>,
    /// The sheet should be dismissed.
    pub dismiss: bool,
}

/// Pick the snap target for a release at `progress` moving at `velocity`.
///
/// `velocity` is in progress units per second, positive toward opening. Ties
/// resolve to the earlier candidate, with dismissal considered first. With no
/// snap points and no dismissal allowed, the sheet stays at `progress`.
pub fn determine_snap_target(
    progress: f64,
    velocity: f64,
    points: &[f64],
    impact: f64,
    can_dismiss: bool,
) -> SnapTarget {
    let projected = progress + velocity * impact;
    let dismiss = can_dismiss.then_some(SnapTarget {
        progress: 0.0,
        index: None,
        dismiss: true,
    });
    let candidates = dismiss.into_iter().chain(
        points
            .iter()
            .enumerate()
            .map(|(i, p)| SnapTarget {
                progress: *p,
                index: Some(i),
                dismiss: false,
            }),
    );
    let mut best: Option<(f64, SnapTarget)> = None;
    for candidate in candidates {
        let distance = (candidate.progress - projected).abs();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map_or(
        SnapTarget {
            progress,
            index: None,
            dismiss: false,
        },
        |(_, target)| target,
    )
}
