// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform builder: turns a resolved pair of rectangles into a style.
//!
//! ## Model
//!
//! A shared element travels from a *start* rectangle (measured on the source
//! screen) to an *end* rectangle (measured on the destination screen, or a
//! [`Target`](crate::Target) override). The screen being styled is either the
//! destination, whose view is laid out at `end`, or the source, whose view is
//! laid out at `start`. Either way the view is moved onto the interpolated
//! rectangle for the current local progress.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::query::{BoundsQuery, Method, ScaleMode};

/// Which side of a transition the styled screen is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The entering or focused screen; its view is laid out at the end rectangle.
    Destination,
    /// A screen being covered or revealed; its view is laid out at the start rectangle.
    Source,
}

/// A resolved start/end pair and the rectangle interpolated between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundsFrame {
    /// Side of the transition being styled.
    pub role: Role,
    /// Source rectangle.
    pub start: Rect,
    /// Destination rectangle.
    pub end: Rect,
    /// Local progress in `0..=1`.
    pub t: f64,
    /// Rectangle at `t`.
    pub current: Rect,
}

impl BoundsFrame {
    /// Build a frame, clamping `t` to `0..=1`.
    pub fn new(role: Role, start: Rect, end: Rect, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            role,
            start,
            end,
            t,
            current: lerp_rect(start, end, t),
        }
    }

    /// Where the styled view is laid out.
    pub fn own(&self) -> Rect {
        match self.role {
            Role::Destination => self.end,
            Role::Source => self.start,
        }
    }
}

/// Style produced for one tagged view.
///
/// `translate` and `scale` apply about `origin`, which is expressed in the
/// view's local coordinates (for [`Method::Content`], in screen coordinates).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundStyle {
    /// Translation applied after scaling.
    pub translate: Vec2,
    /// Horizontal and vertical scale factors.
    pub scale: Vec2,
    /// Explicit size, for [`Method::Size`].
    pub size: Option<Size>,
    /// Transform origin.
    pub origin: Point,
}

impl BoundStyle {
    /// The no-op style returned when a measurement is missing.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
        size: None,
        origin: Point::ZERO,
    };

    /// True when applying this style would not move, scale, or resize anything.
    pub fn is_identity(&self) -> bool {
        self.translate == Vec2::ZERO && self.scale == Vec2::new(1.0, 1.0) && self.size.is_none()
    }

    /// Matrix form, for a view laid out at `layout` in the parent's coordinates.
    pub fn to_affine(&self, layout: Rect) -> Affine {
        let pivot = layout.origin().to_vec2() + self.origin.to_vec2();
        Affine::translate(pivot + self.translate)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-pivot)
    }
}

impl Default for BoundStyle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Componentwise interpolation between two rectangles.
pub fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x0, b.x0, t),
        lerp(a.y0, b.y0, t),
        lerp(a.x1, b.x1, t),
        lerp(a.y1, b.y1, t),
    )
}

fn ratio(to: f64, from: f64) -> f64 {
    if from > 0.0 { to / from } else { 1.0 }
}

/// Scale factors taking `from` to `to` under `mode`.
pub fn scale_between(from: Rect, to: Rect, mode: ScaleMode) -> Vec2 {
    let sx = ratio(to.width(), from.width());
    let sy = ratio(to.height(), from.height());
    match mode {
        ScaleMode::Match => Vec2::new(sx, sy),
        ScaleMode::Uniform => {
            let s = sx.max(sy);
            Vec2::new(s, s)
        }
        ScaleMode::None => Vec2::new(1.0, 1.0),
    }
}

/// Compute the style for `frame` according to `query`'s method, scale mode,
/// anchor and gesture offset.
pub fn compute(frame: &BoundsFrame, query: &BoundsQuery) -> BoundStyle {
    let own = frame.own();
    let current = frame.current;
    let gesture = query.gestures.unwrap_or(Vec2::ZERO);
    let own_anchor = query.anchor.point(own);
    let current_anchor = query.anchor.point(current);

    match query.method {
        Method::Transform => BoundStyle {
            translate: current_anchor - own_anchor + gesture,
            scale: scale_between(own, current, query.scale_mode),
            size: None,
            origin: (own_anchor - own.origin()).to_point(),
        },
        Method::Size => match query.scale_mode {
            ScaleMode::None => BoundStyle {
                translate: current_anchor - own_anchor + gesture,
                size: Some(own.size()),
                ..BoundStyle::IDENTITY
            },
            // Replacing the size outright makes the anchor irrelevant.
            ScaleMode::Match | ScaleMode::Uniform => BoundStyle {
                translate: current.origin() - own.origin() + gesture,
                size: Some(current.size()),
                ..BoundStyle::IDENTITY
            },
        },
        Method::Content => {
            let scale = scale_between(own, current, query.scale_mode);
            let scaled_anchor = Vec2::new(own_anchor.x * scale.x, own_anchor.y * scale.y);
            BoundStyle {
                translate: current_anchor.to_vec2() - scaled_anchor + gesture,
                scale,
                size: None,
                origin: Point::ZERO,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Anchor;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn source() -> Rect {
        Rect::new(20.0, 100.0, 120.0, 200.0)
    }

    fn dest() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn destination_starts_on_source_and_ends_in_place() {
        let q = BoundsQuery::new("hero");
        let f0 = BoundsFrame::new(Role::Destination, source(), dest(), 0.0);
        let s0 = compute(&f0, &q);
        let m0 = s0.to_affine(dest());
        assert!(close(m0 * dest().origin(), source().origin()));
        assert!(close(
            m0 * Point::new(dest().x1, dest().y1),
            Point::new(source().x1, source().y1)
        ));

        let f1 = BoundsFrame::new(Role::Destination, source(), dest(), 1.0);
        assert!(compute(&f1, &q).is_identity());
    }

    #[test]
    fn source_leaves_toward_destination() {
        let q = BoundsQuery::new("hero");
        let f0 = BoundsFrame::new(Role::Source, source(), dest(), 0.0);
        assert!(compute(&f0, &q).is_identity());
        let f1 = BoundsFrame::new(Role::Source, source(), dest(), 1.0);
        let m1 = compute(&f1, &q).to_affine(source());
        assert!(close(m1 * source().origin(), dest().origin()));
    }

    #[test]
    fn halfway_lands_on_interpolated_rect() {
        let q = BoundsQuery::new("hero").with_anchor(Anchor::TopLeading);
        let f = BoundsFrame::new(Role::Destination, source(), dest(), 0.5);
        let m = compute(&f, &q).to_affine(dest());
        assert!(close(m * dest().origin(), f.current.origin()));
        assert_eq!(f.current, Rect::new(10.0, 50.0, 260.0, 250.0));
    }

    #[test]
    fn size_method_interpolates_dimensions() {
        let q = BoundsQuery::new("hero").with_method(Method::Size);
        let f = BoundsFrame::new(Role::Destination, source(), dest(), 0.0);
        let s = compute(&f, &q);
        assert_eq!(s.size, Some(source().size()));
        assert_eq!(s.translate, source().origin() - dest().origin());
        assert_eq!(s.scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn scale_modes() {
        let from = Rect::new(0.0, 0.0, 100.0, 50.0);
        let to = Rect::new(0.0, 0.0, 200.0, 150.0);
        assert_eq!(scale_between(from, to, ScaleMode::Match), Vec2::new(2.0, 3.0));
        assert_eq!(scale_between(from, to, ScaleMode::Uniform), Vec2::new(3.0, 3.0));
        assert_eq!(scale_between(from, to, ScaleMode::None), Vec2::new(1.0, 1.0));
        assert_eq!(
            scale_between(Rect::ZERO, to, ScaleMode::Match),
            Vec2::new(1.0, 1.0),
            "degenerate source must not divide by zero"
        );
    }

    #[test]
    fn gestures_are_added_to_translation() {
        let q = BoundsQuery::new("hero").with_gestures(Vec2::new(0.0, 40.0));
        let f = BoundsFrame::new(Role::Destination, source(), dest(), 1.0);
        let s = compute(&f, &q);
        assert_eq!(s.translate, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn content_maps_own_anchor_onto_current() {
        let q = BoundsQuery::new("hero")
            .with_method(Method::Content)
            .with_scale_mode(ScaleMode::Uniform);
        let f = BoundsFrame::new(Role::Destination, source(), dest(), 0.25);
        let s = compute(&f, &q);
        let m = s.to_affine(Rect::from_origin_size(Point::ZERO, Size::new(400.0, 800.0)));
        assert!(close(m * dest().center(), f.current.center()));
    }

    #[test]
    fn local_progress_is_clamped() {
        let f = BoundsFrame::new(Role::Destination, source(), dest(), 4.0);
        assert_eq!(f.t, 1.0);
        assert_eq!(f.current, dest());
    }
}
