// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll boundary checks for touches that start inside a scrollable.
//!
//! A dismiss gesture may only take over from a nested scrollable once the
//! scrollable has reached its edge in the direction the finger is travelling.
//! Offsets use the host's convention: `0` is the top (or leading) edge and the
//! offset grows toward the end of the content.

use kurbo::{Size, Vec2};

use crate::types::GestureAxis;

/// Offsets within this distance of an edge count as being at the edge.
pub const BOUNDARY_TOLERANCE: f64 = 0.5;

/// Snapshot of a nested scrollable under the touch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Current content offset.
    pub offset: Vec2,
    /// Total content size.
    pub content: Size,
    /// Visible viewport size.
    pub viewport: Size,
}

impl ScrollState {
    /// A scrollable at `offset` with the given content and viewport sizes.
    pub const fn new(offset: Vec2, content: Size, viewport: Size) -> Self {
        Self {
            offset,
            content,
            viewport,
        }
    }

    /// Largest reachable offset on each axis.
    pub fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.viewport.width).max(0.0),
            (self.content.height - self.viewport.height).max(0.0),
        )
    }

    /// True when the content overflows along `axis`' line.
    pub fn scrolls_along(&self, axis: GestureAxis) -> bool {
        let max = self.max_offset();
        if axis.is_vertical() {
            max.y > 0.0
        } else {
            max.x > 0.0
        }
    }

    /// True when a finger moving in `axis`' dismiss direction cannot scroll further.
    ///
    /// Dragging down reveals content above, so [`GestureAxis::Vertical`] is at
    /// its boundary when the offset is at the top; the inverted axes need the
    /// far edge.
    pub fn at_boundary(&self, axis: GestureAxis) -> bool {
        let max = self.max_offset();
        match axis {
            GestureAxis::Vertical => self.offset.y <= BOUNDARY_TOLERANCE,
            GestureAxis::VerticalInverted => self.offset.y >= max.y - BOUNDARY_TOLERANCE,
            GestureAxis::Horizontal => self.offset.x <= BOUNDARY_TOLERANCE,
            GestureAxis::HorizontalInverted => self.offset.x >= max.x - BOUNDARY_TOLERANCE,
        }
    }

    /// True when the scrollable lets a drag of `delta` go to the `axis` gesture.
    ///
    /// That is the case when the content does not scroll along the axis at
    /// all, or when it sits at the boundary and the drag continues in the
    /// dismiss direction.
    pub fn yields_to(&self, axis: GestureAxis, delta: Vec2) -> bool {
        !self.scrolls_along(axis) || (self.at_boundary(axis) && axis.component(delta) > 0.0)
    }
}
