// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen gesture configuration.

use crate::types::DirectionSet;

/// Default travel, in logical pixels, before a touch is recognized as a pan.
pub const ACTIVATION_DISTANCE: f64 = 8.0;

/// Default weight of release velocity in dismissal and snap decisions.
pub const DEFAULT_VELOCITY_IMPACT: f64 = 0.3;

/// How a screen reacts to pan gestures.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Pan gestures are recognized at all.
    pub enabled: bool,
    /// Axes the screen claims when mounted.
    pub directions: DirectionSet,
    /// Dragging writes transition progress directly instead of only the gesture offset.
    pub drives_progress: bool,
    /// Weight of normalized release velocity.
    pub velocity_impact: f64,
    /// The screen owns its axes but never moves or dismisses.
    pub snap_locked: bool,
    /// Progress values a sheet may rest at, ascending.
    pub snap_points: Vec<f64>,
    /// Index into `snap_points` the sheet opens to.
    pub initial_snap_index: usize,
    /// Travel before a touch activates.
    pub activation_distance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directions: DirectionSet::VERTICAL,
            drives_progress: true,
            velocity_impact: DEFAULT_VELOCITY_IMPACT,
            snap_locked: false,
            snap_points: Vec::new(),
            initial_snap_index: 0,
            activation_distance: ACTIVATION_DISTANCE,
        }
    }
}

impl GestureConfig {
    /// An enabled configuration claiming `directions`.
    pub fn enabled(directions: impl Into<DirectionSet>) -> Self {
        Self {
            enabled: true,
            directions: directions.into(),
            ..Self::default()
        }
    }

    /// Set whether gestures are recognized.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the claimed axes.
    #[must_use]
    pub fn with_directions(mut self, directions: impl Into<DirectionSet>) -> Self {
        self.directions = directions.into();
        self
    }

    /// Set whether dragging writes progress.
    #[must_use]
    pub fn with_drives_progress(mut self, drives: bool) -> Self {
        self.drives_progress = drives;
        self
    }

    /// Set the velocity weight.
    #[must_use]
    pub fn with_velocity_impact(mut self, impact: f64) -> Self {
        self.velocity_impact = impact;
        self
    }

    /// Lock the screen in place while keeping its claims.
    #[must_use]
    pub fn with_snap_locked(mut self, locked: bool) -> Self {
        self.snap_locked = locked;
        self
    }

    /// Set the snap points; they are sorted ascending and non-finite values dropped.
    #[must_use]
    pub fn with_snap_points(mut self, points: impl IntoIterator<Item = f64>) -> Self {
        let mut points: Vec<f64> = points.into_iter().filter(|p| p.is_finite()).collect();
        points.sort_by(f64::total_cmp);
        self.snap_points = points;
        self
    }

    /// Set the snap point the sheet opens to.
    #[must_use]
    pub fn with_initial_snap_index(mut self, index: usize) -> Self {
        self.initial_snap_index = index;
        self
    }

    /// Claimed axes, or none when gestures are disabled.
    pub fn claimed_directions(&self) -> DirectionSet {
        if self.enabled {
            self.directions
        } else {
            DirectionSet::empty()
        }
    }

    /// Snap index the sheet opens to, clamped to the available points.
    pub fn initial_snap(&self) -> Option<usize> {
        let last = self.snap_points.len().checked_sub(1)?;
        Some(self.initial_snap_index.min(last))
    }

    /// Progress at snap `index`, or `1` when there is no such point.
    pub fn snap_progress(&self, index: Option<usize>) -> f64 {
        index
            .and_then(|i| self.snap_points.get(i).copied())
            .unwrap_or(1.0)
    }

    /// Largest progress a drag may reach.
    pub fn max_progress(&self) -> f64 {
        self.snap_points.last().copied().unwrap_or(1.0).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GestureAxis;

    #[test]
    fn disabled_claims_nothing() {
        let config = GestureConfig::default().with_directions(DirectionSet::BIDIRECTIONAL);
        assert!(config.claimed_directions().is_empty());
        let config = config.with_enabled(true);
        assert_eq!(config.claimed_directions(), DirectionSet::BIDIRECTIONAL);
    }

    #[test]
    fn snap_points_are_sorted_and_clamped() {
        let config = GestureConfig::enabled(GestureAxis::Vertical)
            .with_snap_points([1.0, f64::NAN, 0.4])
            .with_initial_snap_index(9);
        assert_eq!(config.snap_points, [0.4, 1.0]);
        assert_eq!(config.initial_snap(), Some(1));
        assert_eq!(config.snap_progress(Some(0)), 0.4);
        assert_eq!(config.snap_progress(None), 1.0);
        assert_eq!(GestureConfig::default().initial_snap(), None);
    }
}
