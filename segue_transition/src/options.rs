// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen transition options.

use std::fmt;
use std::sync::Arc;

use segue_gesture::GestureConfig;

use crate::interpolator::ScreenInterpolator;

/// Easing curve for timing animations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic ease in.
    InQuad,
    /// Quadratic ease out.
    OutQuad,
    /// Quadratic ease in and out.
    InOutQuad,
    /// Cubic ease in.
    InCubic,
    /// Cubic ease out.
    #[default]
    OutCubic,
    /// Cubic ease in and out.
    InOutCubic,
}

impl Easing {
    /// Map linear time `t` (clamped to `0..=1`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// How a progress animation moves.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionSpec {
    /// Fixed duration along an easing curve. Release velocity is ignored.
    Timing {
        /// Duration in seconds.
        duration: f64,
        /// Easing curve.
        easing: Easing,
    },
    /// Damped spring seeded with the release velocity.
    Spring {
        /// Spring constant.
        stiffness: f64,
        /// Damping coefficient.
        damping: f64,
        /// Mass.
        mass: f64,
    },
}

impl TransitionSpec {
    /// Heavily damped spring used when a screen does not choose one.
    pub const DEFAULT_SPRING: Self = Self::Spring {
        stiffness: 1000.0,
        damping: 500.0,
        mass: 3.0,
    };

    /// A timing animation with the default easing.
    pub fn timing(duration: f64) -> Self {
        Self::Timing {
            duration,
            easing: Easing::default(),
        }
    }

    /// A spring animation.
    pub const fn spring(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self::Spring {
            stiffness,
            damping,
            mass,
        }
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::DEFAULT_SPRING
    }
}

/// Specs for opening and closing a screen.
///
/// Gesture settles use `open`; dismissals use `close`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpecs {
    /// Used when the screen animates toward its rest progress.
    pub open: TransitionSpec,
    /// Used when the screen animates toward `0`.
    pub close: TransitionSpec,
}

impl TransitionSpecs {
    /// The same spec in both directions.
    pub const fn both(spec: TransitionSpec) -> Self {
        Self {
            open: spec,
            close: spec,
        }
    }
}

/// Options a screen is pushed with.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScreenOptions {
    /// Gesture behaviour.
    pub gesture: GestureConfig,
    /// Open and close animations.
    pub transition_spec: TransitionSpecs,
    /// Produces the screen's styles each frame.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub interpolator: Option<Arc<dyn ScreenInterpolator>>,
    /// When `false`, pushes and dismissals jump straight to their end state.
    pub animation_enabled: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            transition_spec: TransitionSpecs::default(),
            interpolator: None,
            animation_enabled: true,
        }
    }
}

impl fmt::Debug for ScreenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenOptions")
            .field("gesture", &self.gesture)
            .field("transition_spec", &self.transition_spec)
            .field("has_interpolator", &self.interpolator.is_some())
            .field("animation_enabled", &self.animation_enabled)
            .finish()
    }
}

impl ScreenOptions {
    /// Set the gesture configuration.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set both transition specs.
    #[must_use]
    pub fn with_transition_spec(mut self, specs: TransitionSpecs) -> Self {
        self.transition_spec = specs;
        self
    }

    /// Set the opening spec.
    #[must_use]
    pub fn with_open_spec(mut self, spec: TransitionSpec) -> Self {
        self.transition_spec.open = spec;
        self
    }

    /// Set the closing spec.
    #[must_use]
    pub fn with_close_spec(mut self, spec: TransitionSpec) -> Self {
        self.transition_spec.close = spec;
        self
    }

    /// Set the interpolator.
    #[must_use]
    pub fn with_interpolator(mut self, interpolator: impl ScreenInterpolator + 'static) -> Self {
        self.interpolator = Some(Arc::new(interpolator));
        self
    }

    /// Enable or disable animation.
    #[must_use]
    pub fn with_animation_enabled(mut self, enabled: bool) -> Self {
        self.animation_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::InQuad,
            Easing::OutQuad,
            Easing::InOutQuad,
            Easing::InCubic,
            Easing::OutCubic,
            Easing::InOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
            assert_eq!(easing.apply(2.0), 1.0, "{easing:?}");
        }
        assert_eq!(Easing::InOutQuad.apply(0.5), 0.5);
        assert!(Easing::OutCubic.apply(0.5) > 0.5);
    }

    #[test]
    fn debug_hides_interpolator() {
        let options = ScreenOptions::default()
            .with_interpolator(|_: &crate::InterpolationProps<'_>| crate::StylePatchMap::new());
        let text = format!("{options:?}");
        assert!(text.contains("has_interpolator: true"));
    }
}
