// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation helpers layered on top of bounds matching.

use std::fmt::Debug;
use std::hash::Hash;

use kurbo::{Point, Rect, RoundedRect, Vec2};

use crate::context::BoundsContext;
use crate::query::{BoundsQuery, Method, ScaleMode, Target};
use crate::transform::{BoundStyle, Role, compute, lerp};
use crate::types::BoundTag;

/// Options for [`Navigation::zoom`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomOptions {
    /// Corner radius of the source element.
    pub border_radius: f64,
    /// Corner radius of the fully expanded screen.
    pub target_border_radius: f64,
    /// Backdrop opacity reached when the zoom completes.
    pub backdrop_opacity: f64,
    /// Scale the covered screen shrinks to.
    pub behind_scale: f64,
    /// Live gesture translation to follow.
    pub gestures: Option<Vec2>,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            border_radius: 12.0,
            target_border_radius: 0.0,
            backdrop_opacity: 0.5,
            behind_scale: 0.95,
            gestures: None,
        }
    }
}

/// Styles emitted by [`Navigation::zoom`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomStyle {
    /// Transform for the screen container.
    pub content: BoundStyle,
    /// Clip for the screen container, in window coordinates.
    pub mask: Option<RoundedRect>,
    /// Opacity of the backdrop behind the zooming screen.
    pub overlay_opacity: f64,
    /// Opacity for the tagged element itself; the covered screen hides its
    /// copy so it does not show twice.
    pub element_opacity: f64,
}

/// Entry point for navigation helpers; see [`BoundsContext::navigation`].
#[derive(Debug)]
pub struct Navigation<'a, K> {
    ctx: BoundsContext<'a, K>,
}

impl<K: Copy> Clone for Navigation<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Copy> Copy for Navigation<'_, K> {}

impl<'a, K: Copy + Eq + Hash + Debug> Navigation<'a, K> {
    pub(crate) fn new(ctx: BoundsContext<'a, K>) -> Self {
        Self { ctx }
    }

    /// Zoom the destination screen out of the tagged source element.
    ///
    /// On the destination the content transform is the same
    /// [`Method::Content`] transform [`BoundsContext::bounds`] produces (from
    /// the source rectangle to the full screen); the mask and backdrop ramp are
    /// added on top. On the covered screen the content shrinks slightly toward
    /// [`ZoomOptions::behind_scale`] and the source element is hidden while the
    /// zoom is in flight.
    pub fn zoom(&self, id: impl Into<BoundTag>, options: ZoomOptions) -> ZoomStyle {
        let t = self.ctx.local_progress();
        match self.ctx.role() {
            Role::Destination => self.zoom_destination(id.into(), options, t),
            Role::Source => {
                let screen = Rect::from_origin_size(Point::ZERO, self.ctx.screen());
                let s = lerp(1.0, options.behind_scale, t);
                ZoomStyle {
                    content: BoundStyle {
                        scale: Vec2::new(s, s),
                        origin: screen.center(),
                        ..BoundStyle::IDENTITY
                    },
                    mask: None,
                    overlay_opacity: 0.0,
                    element_opacity: if t > 0.0 { 0.0 } else { 1.0 },
                }
            }
        }
    }

    fn zoom_destination(&self, id: BoundTag, options: ZoomOptions, t: f64) -> ZoomStyle {
        let mut query = BoundsQuery::new(id)
            .with_method(Method::Content)
            .with_scale_mode(ScaleMode::Uniform)
            .with_target(Target::Fullscreen);
        query.gestures = options.gestures;
        let overlay_opacity = options.backdrop_opacity * t;
        let Some(frame) = self.ctx.raw(&query) else {
            return ZoomStyle {
                content: BoundStyle::IDENTITY,
                mask: None,
                overlay_opacity,
                element_opacity: 1.0,
            };
        };
        let radius = lerp(options.border_radius, options.target_border_radius, t);
        let mask = frame.current + options.gestures.unwrap_or(Vec2::ZERO);
        ZoomStyle {
            content: compute(&frame, &query),
            mask: Some(RoundedRect::from_rect(mask, radius)),
            overlay_opacity,
            element_opacity: 1.0,
        }
    }
}
