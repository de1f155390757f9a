// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: axes, direction sets, pan events and the navigator ancestry lookup.

use kurbo::{Size, Vec2};

/// One of the four independently owned gesture axes.
///
/// Each axis names the direction a finger travels to dismiss the screen:
/// `Vertical` dismisses downward, `VerticalInverted` upward, `Horizontal`
/// rightward and `HorizontalInverted` leftward. `Vertical` and
/// `VerticalInverted` share a physical line but are distinct for ownership.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureAxis {
    /// Swipe down to dismiss.
    Vertical,
    /// Swipe up to dismiss.
    VerticalInverted,
    /// Swipe right to dismiss.
    Horizontal,
    /// Swipe left to dismiss.
    HorizontalInverted,
}

impl GestureAxis {
    /// All axes in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Vertical,
        Self::VerticalInverted,
        Self::Horizontal,
        Self::HorizontalInverted,
    ];

    /// True for the two vertical axes.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::VerticalInverted)
    }

    /// Component of `v` along this axis, positive in the dismiss direction.
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::VerticalInverted => -v.y,
            Self::Horizontal => v.x,
            Self::HorizontalInverted => -v.x,
        }
    }

    /// Screen extent along this axis: height for vertical axes, width otherwise.
    pub fn extent(self, screen: Size) -> f64 {
        if self.is_vertical() {
            screen.height
        } else {
            screen.width
        }
    }

    /// The axis whose dismiss direction matches the dominant component of `delta`.
    ///
    /// Returns `None` for a zero delta. Ties favour the vertical axes.
    pub fn from_delta(delta: Vec2) -> Option<Self> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        Some(if delta.y.abs() >= delta.x.abs() {
            if delta.y >= 0.0 {
                Self::Vertical
            } else {
                Self::VerticalInverted
            }
        } else if delta.x >= 0.0 {
            Self::Horizontal
        } else {
            Self::HorizontalInverted
        })
    }

    /// The single-axis direction set for this axis.
    pub const fn flag(self) -> DirectionSet {
        match self {
            Self::Vertical => DirectionSet::VERTICAL,
            Self::VerticalInverted => DirectionSet::VERTICAL_INVERTED,
            Self::Horizontal => DirectionSet::HORIZONTAL,
            Self::HorizontalInverted => DirectionSet::HORIZONTAL_INVERTED,
        }
    }
}

bitflags::bitflags! {
    /// A set of gesture axes, as declared by a screen's configuration.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DirectionSet: u8 {
        /// Swipe down to dismiss.
        const VERTICAL            = 0b0000_0001;
        /// Swipe up to dismiss.
        const VERTICAL_INVERTED   = 0b0000_0010;
        /// Swipe right to dismiss.
        const HORIZONTAL          = 0b0000_0100;
        /// Swipe left to dismiss.
        const HORIZONTAL_INVERTED = 0b0000_1000;
        /// Every axis.
        const BIDIRECTIONAL = Self::VERTICAL.bits()
            | Self::VERTICAL_INVERTED.bits()
            | Self::HORIZONTAL.bits()
            | Self::HORIZONTAL_INVERTED.bits();
    }
}

impl DirectionSet {
    /// Iterate the axes in this set, in [`GestureAxis::ALL`] order.
    pub fn axes(self) -> impl Iterator<Item = GestureAxis> {
        GestureAxis::ALL
            .into_iter()
            .filter(move |axis| self.contains(axis.flag()))
    }

    /// True when `axis` is in this set.
    pub fn has(self, axis: GestureAxis) -> bool {
        self.contains(axis.flag())
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::VERTICAL
    }
}

impl From<GestureAxis> for DirectionSet {
    fn from(axis: GestureAxis) -> Self {
        axis.flag()
    }
}

impl FromIterator<GestureAxis> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = GestureAxis>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, axis| set | axis.flag())
    }
}

/// State of a raw pan event from the host gesture layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanState {
    /// Finger down.
    Began,
    /// Finger moved.
    Changed,
    /// Finger lifted.
    Ended,
    /// The host cancelled the touch.
    Cancelled,
}

/// One raw pan sample: total translation since the touch began and velocity in px/s.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanEvent {
    /// Translation since `Began`.
    pub translation: Vec2,
    /// Velocity in logical pixels per second.
    pub velocity: Vec2,
    /// Event state.
    pub state: PanState,
}

impl PanEvent {
    /// A touch starting at rest.
    pub const fn began() -> Self {
        Self {
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            state: PanState::Began,
        }
    }

    /// A movement sample.
    pub const fn changed(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            translation,
            velocity,
            state: PanState::Changed,
        }
    }

    /// The final sample when the finger lifts.
    pub const fn ended(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            translation,
            velocity,
            state: PanState::Ended,
        }
    }

    /// A cancelled touch.
    pub const fn cancelled() -> Self {
        Self {
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            state: PanState::Cancelled,
        }
    }
}

/// Look up the parent navigator of a navigator, for ownership inheritance.
///
/// Supplied by the host router. Ancestry must be acyclic.
pub trait NavigatorParent<N> {
    /// Returns the parent of `navigator`, or `None` for a root navigator.
    fn parent_of(&self, navigator: &N) -> Option<N>;
}

/// A parent lookup for a single flat navigator: every navigator is a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<N> NavigatorParent<N> for NoParent {
    #[inline]
    fn parent_of(&self, _navigator: &N) -> Option<N> {
        None
    }
}

impl<N, F: Fn(&N) -> Option<N>> NavigatorParent<N> for F {
    fn parent_of(&self, navigator: &N) -> Option<N> {
        self(navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_signed_toward_dismiss() {
        let down_right = Vec2::new(3.0, 5.0);
        assert_eq!(GestureAxis::Vertical.component(down_right), 5.0);
        assert_eq!(GestureAxis::VerticalInverted.component(down_right), -5.0);
        assert_eq!(GestureAxis::Horizontal.component(down_right), 3.0);
        assert_eq!(GestureAxis::HorizontalInverted.component(down_right), -3.0);
    }

    #[test]
    fn extent_picks_dimension() {
        let screen = Size::new(390.0, 844.0);
        assert_eq!(GestureAxis::Vertical.extent(screen), 844.0);
        assert_eq!(GestureAxis::HorizontalInverted.extent(screen), 390.0);
    }

    #[test]
    fn dominant_axis_from_delta() {
        assert_eq!(GestureAxis::from_delta(Vec2::ZERO), None);
        assert_eq!(
            GestureAxis::from_delta(Vec2::new(2.0, 9.0)),
            Some(GestureAxis::Vertical)
        );
        assert_eq!(
            GestureAxis::from_delta(Vec2::new(2.0, -9.0)),
            Some(GestureAxis::VerticalInverted)
        );
        assert_eq!(
            GestureAxis::from_delta(Vec2::new(-12.0, 4.0)),
            Some(GestureAxis::HorizontalInverted)
        );
        assert_eq!(
            GestureAxis::from_delta(Vec2::new(5.0, 5.0)),
            Some(GestureAxis::Vertical)
        );
    }

    #[test]
    fn bidirectional_covers_all_axes() {
        assert_eq!(DirectionSet::BIDIRECTIONAL.axes().count(), 4);
        let set: DirectionSet = [GestureAxis::Horizontal, GestureAxis::Vertical]
            .into_iter()
            .collect();
        assert_eq!(
            set.axes().collect::<Vec<_>>(),
            [GestureAxis::Vertical, GestureAxis::Horizontal]
        );
        assert!(!set.has(GestureAxis::VerticalInverted));
    }
}
