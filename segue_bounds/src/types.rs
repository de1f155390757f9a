// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the bound store: tags, measured rectangles, and the host measurement hook.

use std::borrow::Borrow;
use std::fmt;

use kurbo::{Point, Rect, Size};

/// Application-chosen name for a logical shared element.
///
/// Tags are not unique per screen: the same tag on a source and a destination
/// screen is what requests a continuity transform between them. Tags derived
/// from route parameters (for example `multi-img-{item}`) keep list items from
/// interfering with one another.
///
/// A `BoundTag` hashes and compares like its string contents, so maps keyed by
/// tag can be queried with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundTag(Box<str>);

impl BoundTag {
    /// Create a tag from any string-like value.
    pub fn new(tag: impl Into<Box<str>>) -> Self {
        Self(tag.into())
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BoundTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BoundTag {
    fn from(tag: &str) -> Self {
        Self(tag.into())
    }
}

impl From<String> for BoundTag {
    fn from(tag: String) -> Self {
        Self(tag.into_boxed_str())
    }
}

impl From<&BoundTag> for BoundTag {
    fn from(tag: &BoundTag) -> Self {
        tag.clone()
    }
}

impl fmt::Display for BoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coordinate space used when reading a [`MeasuredBounds`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Space {
    /// Relative to the measured view's immediate parent container.
    #[default]
    Relative,
    /// Relative to the window.
    Absolute,
}

/// Snapshot of a view's layout, relative to its parent and to the window.
///
/// Produced by the host's measurement primitive (see [`Measure`]) and stored
/// in a [`BoundStore`](crate::BoundStore) keyed by `(screen, tag)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredBounds {
    /// Horizontal offset within the parent.
    pub x: f64,
    /// Vertical offset within the parent.
    pub y: f64,
    /// Measured width.
    pub width: f64,
    /// Measured height.
    pub height: f64,
    /// Horizontal offset within the window.
    pub page_x: f64,
    /// Vertical offset within the window.
    pub page_y: f64,
}

impl MeasuredBounds {
    /// Create a measurement from explicit components.
    pub const fn new(x: f64, y: f64, width: f64, height: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            page_x,
            page_y,
        }
    }

    /// A measurement whose parent is the window, so relative and absolute
    /// origins coincide.
    pub const fn from_page(page_x: f64, page_y: f64, width: f64, height: f64) -> Self {
        Self::new(page_x, page_y, width, height, page_x, page_y)
    }

    /// Measured size.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Origin in the requested space.
    pub const fn origin(&self, space: Space) -> Point {
        match space {
            Space::Relative => Point::new(self.x, self.y),
            Space::Absolute => Point::new(self.page_x, self.page_y),
        }
    }

    /// Rectangle in the requested space.
    pub fn rect(&self, space: Space) -> Rect {
        Rect::from_origin_size(self.origin(space), self.size())
    }

    /// True when the measurement has no area (typically an unlaid-out view).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Host measurement primitive.
///
/// Implemented by the host UI toolkit for its view handle type `V`. The call is
/// synchronous and only issued from the animation context; `None` means the
/// view is not laid out (or no longer exists).
pub trait Measure<V> {
    /// Measure `view`, returning its parent-relative and window-relative layout.
    fn measure(&self, view: &V) -> Option<MeasuredBounds>;
}

impl<V, F> Measure<V> for F
where
    F: Fn(&V) -> Option<MeasuredBounds>,
{
    fn measure(&self, view: &V) -> Option<MeasuredBounds> {
        self(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn tag_lookups_accept_str() {
        let mut map = HashMap::new();
        map.insert(BoundTag::from("hero"), 1);
        assert_eq!(map.get("hero"), Some(&1));
        assert_eq!(BoundTag::from(String::from("hero")).as_str(), "hero");
    }

    #[test]
    fn rect_respects_space() {
        let m = MeasuredBounds::new(10.0, 20.0, 100.0, 50.0, 110.0, 220.0);
        assert_eq!(m.rect(Space::Relative), Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(m.rect(Space::Absolute), Rect::new(110.0, 220.0, 210.0, 270.0));
    }

    #[test]
    fn zero_area_is_empty() {
        assert!(MeasuredBounds::default().is_empty());
        assert!(!MeasuredBounds::from_page(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn closures_measure() {
        let host = |v: &u32| (*v == 7).then(|| MeasuredBounds::from_page(0.0, 0.0, 7.0, 7.0));
        assert!(host.measure(&7).is_some());
        assert!(host.measure(&1).is_none());
    }
}
