// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds requests issued from inside an interpolator.

use kurbo::{Point, Rect, Vec2};

use crate::types::{BoundTag, Space};

/// Destination rectangle for a bounds request.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// The destination screen's own measurement of the tag.
    #[default]
    Bound,
    /// The whole screen, `(0, 0)` to the screen size.
    Fullscreen,
    /// An explicit rectangle, in the request's space.
    Rect(Rect),
}

/// How the size difference between source and destination is expressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Translate and scale the view; no relayout.
    #[default]
    Transform,
    /// Interpolate width and height explicitly and translate the origin.
    Size,
    /// Transform the whole screen content so the tagged view lands on the
    /// interpolated rectangle. Always computed in window space.
    Content,
}

/// Scale policy applied by [`Method::Transform`] and [`Method::Content`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleMode {
    /// Independent horizontal and vertical factors.
    #[default]
    Match,
    /// A single factor (the larger of the two), preserving aspect ratio.
    Uniform,
    /// Never scale; only translate.
    None,
}

/// Point of the rectangle kept aligned while it moves and scales.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Top-left corner.
    TopLeading,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopTrailing,
    /// Middle of the left edge.
    Leading,
    /// Center.
    #[default]
    Center,
    /// Middle of the right edge.
    Trailing,
    /// Bottom-left corner.
    BottomLeading,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomTrailing,
}

impl Anchor {
    const fn factors(self) -> (f64, f64) {
        match self {
            Self::TopLeading => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopTrailing => (1.0, 0.0),
            Self::Leading => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Trailing => (1.0, 0.5),
            Self::BottomLeading => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomTrailing => (1.0, 1.0),
        }
    }

    /// The anchor's position on `rect`.
    pub fn point(self, rect: Rect) -> Point {
        let (fx, fy) = self.factors();
        Point::new(rect.x0 + rect.width() * fx, rect.y0 + rect.height() * fy)
    }
}

/// A request for the transition style of one tagged view.
///
/// Built with [`BoundsQuery::new`] and the `with_*` methods, then passed to
/// [`BoundsContext::bounds`](crate::BoundsContext::bounds).
///
/// ```
/// use segue_bounds::{BoundsQuery, Method, ScaleMode, Space, Target};
///
/// let q = BoundsQuery::new("hero")
///     .with_space(Space::Absolute)
///     .with_method(Method::Size)
///     .with_target(Target::Fullscreen);
/// assert_eq!(q.id.as_str(), "hero");
/// assert_eq!(q.scale_mode, ScaleMode::Match);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsQuery {
    /// Tag of the shared element.
    pub id: BoundTag,
    /// Coordinate space for measured rectangles.
    pub space: Space,
    /// Destination override.
    pub target: Target,
    /// How size changes are expressed.
    pub method: Method,
    /// Scale policy.
    pub scale_mode: ScaleMode,
    /// Alignment point.
    pub anchor: Anchor,
    /// Live gesture translation blended into the result.
    pub gestures: Option<Vec2>,
}

impl BoundsQuery {
    /// Request with default options for `id`.
    pub fn new(id: impl Into<BoundTag>) -> Self {
        Self {
            id: id.into(),
            space: Space::default(),
            target: Target::default(),
            method: Method::default(),
            scale_mode: ScaleMode::default(),
            anchor: Anchor::default(),
            gestures: None,
        }
    }

    /// Set the coordinate space.
    #[must_use]
    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Set the destination override.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Set the method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the scale policy.
    #[must_use]
    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Blend a live gesture translation into the result.
    #[must_use]
    pub fn with_gestures(mut self, translation: Vec2) -> Self {
        self.gestures = Some(translation);
        self
    }

    /// Space actually used for lookups; [`Method::Content`] forces window space.
    pub fn effective_space(&self) -> Space {
        match self.method {
            Method::Content => Space::Absolute,
            _ => self.space,
        }
    }
}
