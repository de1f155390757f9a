// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style patches produced by interpolators.
//!
//! A [`StylePatch`] only carries the properties it sets; the host leaves every
//! `None` property at its laid-out value. A [`StylePatchMap`] addresses patches
//! to the screen container ([`StyleKey::Content`]), the backdrop
//! ([`StyleKey::Overlay`]) or a tagged element ([`StyleKey::Tag`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use kurbo::{Affine, Point, RoundedRect, Vec2};
use segue_bounds::{BoundStyle, BoundTag};

/// A style value was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A numeric property is NaN or infinite.
    #[error("style property `{0}` is not finite")]
    NonFinite(&'static str),
    /// Opacity outside `0..=1`.
    #[error("opacity {0} is outside 0..=1")]
    OpacityOutOfRange(f64),
    /// A style key string is empty or uses the reserved `*Style` suffix.
    #[error("unknown style key `{0}`")]
    UnknownKey(String),
}

/// Properties to apply to one view. Unset properties are left alone.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePatch {
    /// Opacity in `0..=1`.
    pub opacity: Option<f64>,
    /// Translation in logical pixels.
    pub translate: Option<Vec2>,
    /// Horizontal and vertical scale.
    pub scale: Option<Vec2>,
    /// Rotation in radians.
    pub rotate: Option<f64>,
    /// Full transform; applied after the individual components.
    pub transform: Option<Affine>,
    /// Pivot for scale and rotation, in the view's local coordinates.
    pub transform_origin: Option<Point>,
    /// Explicit width.
    pub width: Option<f64>,
    /// Explicit height.
    pub height: Option<f64>,
    /// Corner radius.
    pub border_radius: Option<f64>,
    /// Clip in window coordinates.
    pub mask: Option<RoundedRect>,
    /// Stacking order.
    pub z_index: Option<i32>,
}

impl StylePatch {
    /// A patch that sets nothing.
    pub const EMPTY: Self = Self {
        opacity: None,
        translate: None,
        scale: None,
        rotate: None,
        transform: None,
        transform_origin: None,
        width: None,
        height: None,
        border_radius: None,
        mask: None,
        z_index: None,
    };

    /// Set opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set translation.
    #[must_use]
    pub fn with_translate(mut self, translate: Vec2) -> Self {
        self.translate = Some(translate);
        self
    }

    /// Set a uniform scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(Vec2::new(scale, scale));
        self
    }

    /// Set rotation in radians.
    #[must_use]
    pub fn with_rotate(mut self, radians: f64) -> Self {
        self.rotate = Some(radians);
        self
    }

    /// Set corner radius.
    #[must_use]
    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Set the clip.
    #[must_use]
    pub fn with_mask(mut self, mask: RoundedRect) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set stacking order.
    #[must_use]
    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    /// True when nothing is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Overlay `other` on top of `self`: properties set in `other` win.
    pub fn merge(&mut self, other: &Self) {
        fn take<T: Copy>(dst: &mut Option<T>, src: Option<T>) {
            if src.is_some() {
                *dst = src;
            }
        }
        take(&mut self.opacity, other.opacity);
        take(&mut self.translate, other.translate);
        take(&mut self.scale, other.scale);
        take(&mut self.rotate, other.rotate);
        take(&mut self.transform, other.transform);
        take(&mut self.transform_origin, other.transform_origin);
        take(&mut self.width, other.width);
        take(&mut self.height, other.height);
        take(&mut self.border_radius, other.border_radius);
        take(&mut self.mask, other.mask);
        take(&mut self.z_index, other.z_index);
    }

    /// Check that every set value is usable.
    pub fn validate(&self) -> Result<(), StyleError> {
        fn finite(name: &'static str, values: &[f64]) -> Result<(), StyleError> {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(StyleError::NonFinite(name))
            }
        }
        if let Some(o) = self.opacity {
            finite("opacity", &[o])?;
            if !(0.0..=1.0).contains(&o) {
                return Err(StyleError::OpacityOutOfRange(o));
            }
        }
        if let Some(t) = self.translate {
            finite("translate", &[t.x, t.y])?;
        }
        if let Some(s) = self.scale {
            finite("scale", &[s.x, s.y])?;
        }
        if let Some(r) = self.rotate {
            finite("rotate", &[r])?;
        }
        if let Some(a) = self.transform {
            finite("transform", &a.as_coeffs())?;
        }
        if let Some(p) = self.transform_origin {
            finite("transform_origin", &[p.x, p.y])?;
        }
        if let Some(w) = self.width {
            finite("width", &[w])?;
        }
        if let Some(h) = self.height {
            finite("height", &[h])?;
        }
        if let Some(r) = self.border_radius {
            finite("border_radius", &[r])?;
        }
        if let Some(m) = self.mask {
            let r = m.rect();
            finite("mask", &[r.x0, r.y0, r.x1, r.y1])?;
        }
        Ok(())
    }
}

impl From<BoundStyle> for StylePatch {
    fn from(style: BoundStyle) -> Self {
        let mut patch = Self::EMPTY;
        if style.translate != Vec2::ZERO {
            patch.translate = Some(style.translate);
        }
        if style.scale != Vec2::new(1.0, 1.0) {
            patch.scale = Some(style.scale);
        }
        if let Some(size) = style.size {
            patch.width = Some(size.width);
            patch.height = Some(size.height);
        }
        if !patch.is_empty() {
            patch.transform_origin = Some(style.origin);
        }
        patch
    }
}

/// Addressee of a [`StylePatch`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleKey {
    /// The screen container.
    Content,
    /// The backdrop drawn behind the screen.
    Overlay,
    /// An element tagged with a bound tag.
    Tag(BoundTag),
}

impl StyleKey {
    /// Key for a tagged element.
    pub fn tag(tag: impl Into<BoundTag>) -> Self {
        Self::Tag(tag.into())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => f.write_str("contentStyle"),
            Self::Overlay => f.write_str("overlayStyle"),
            Self::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for StyleKey {
    type Err = StyleError;

    /// `contentStyle` and `overlayStyle` name the reserved slots. Any other
    /// non-empty string is a tag, unless it ends in `Style`, which is reserved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contentStyle" => Ok(Self::Content),
            "overlayStyle" => Ok(Self::Overlay),
            "" => Err(StyleError::UnknownKey(String::new())),
            s if s.ends_with("Style") => Err(StyleError::UnknownKey(s.to_owned())),
            s => Ok(Self::Tag(BoundTag::from(s))),
        }
    }
}

/// Patches keyed by addressee, in a stable order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePatchMap(BTreeMap<StyleKey, StylePatch>);

impl StylePatchMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `patch` into the entry for `key`.
    pub fn insert(&mut self, key: StyleKey, patch: StylePatch) {
        self.0.entry(key).or_default().merge(&patch);
    }

    /// Builder form of [`insert`](Self::insert) for [`StyleKey::Content`].
    #[must_use]
    pub fn with_content(mut self, patch: StylePatch) -> Self {
        self.insert(StyleKey::Content, patch);
        self
    }

    /// Builder form of [`insert`](Self::insert) for [`StyleKey::Overlay`].
    #[must_use]
    pub fn with_overlay(mut self, patch: StylePatch) -> Self {
        self.insert(StyleKey::Overlay, patch);
        self
    }

    /// Builder form of [`insert`](Self::insert) for a tagged element.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<BoundTag>, patch: StylePatch) -> Self {
        self.insert(StyleKey::tag(tag), patch);
        self
    }

    /// Patch for `key`.
    pub fn get(&self, key: &StyleKey) -> Option<&StylePatch> {
        self.0.get(key)
    }

    /// Patch for the screen container.
    pub fn content(&self) -> Option<&StylePatch> {
        self.get(&StyleKey::Content)
    }

    /// Patch for the backdrop.
    pub fn overlay(&self) -> Option<&StylePatch> {
        self.get(&StyleKey::Overlay)
    }

    /// Patch for the element tagged `tag`.
    pub fn tag(&self, tag: &str) -> Option<&StylePatch> {
        self.get(&StyleKey::tag(tag))
    }

    /// Mutable patch for `key`, created empty if missing.
    pub fn entry(&mut self, key: StyleKey) -> &mut StylePatch {
        self.0.entry(key).or_default()
    }

    /// Merge every patch of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (key, patch) in &other.0 {
            self.insert(key.clone(), *patch);
        }
    }

    /// All patches in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &StylePatch)> + '_ {
        self.0.iter()
    }

    /// Number of addressed views.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is addressed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop invalid patches, returning the rejected keys with their errors.
    pub fn retain_valid(&mut self) -> Vec<(StyleKey, StyleError)> {
        let mut rejected = Vec::new();
        self.0.retain(|key, patch| match patch.validate() {
            Ok(()) => true,
            Err(err) => {
                rejected.push((key.clone(), err));
                false
            }
        });
        rejected
    }
}

impl FromIterator<(StyleKey, StylePatch)> for StylePatchMap {
    fn from_iter<I: IntoIterator<Item = (StyleKey, StylePatch)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, patch) in iter {
            map.insert(key, patch);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn merge_prefers_set_values() {
        let mut base = StylePatch::EMPTY.with_opacity(0.5).with_scale(2.0);
        base.merge(&StylePatch::EMPTY.with_opacity(1.0));
        assert_eq!(base.opacity, Some(1.0));
        assert_eq!(base.scale, Some(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn validation() {
        assert_eq!(StylePatch::EMPTY.validate(), Ok(()));
        assert_eq!(
            StylePatch::EMPTY.with_opacity(1.5).validate(),
            Err(StyleError::OpacityOutOfRange(1.5))
        );
        assert_eq!(
            StylePatch::EMPTY
                .with_translate(Vec2::new(f64::NAN, 0.0))
                .validate(),
            Err(StyleError::NonFinite("translate"))
        );
    }

    #[test]
    fn key_parsing() {
        assert_eq!("contentStyle".parse::<StyleKey>(), Ok(StyleKey::Content));
        assert_eq!("overlayStyle".parse::<StyleKey>(), Ok(StyleKey::Overlay));
        assert_eq!("hero".parse::<StyleKey>(), Ok(StyleKey::tag("hero")));
        assert!(matches!(
            "headerStyle".parse::<StyleKey>(),
            Err(StyleError::UnknownKey(_))
        ));
        assert!("".parse::<StyleKey>().is_err());
        assert_eq!(StyleKey::Overlay.to_string(), "overlayStyle");
    }

    #[test]
    fn bound_style_conversion() {
        assert!(StylePatch::from(BoundStyle::IDENTITY).is_empty());
        let patch = StylePatch::from(BoundStyle {
            translate: Vec2::new(10.0, 0.0),
            size: Some(Size::new(50.0, 60.0)),
            ..BoundStyle::IDENTITY
        });
        assert_eq!(patch.translate, Some(Vec2::new(10.0, 0.0)));
        assert_eq!(patch.scale, None);
        assert_eq!(patch.width, Some(50.0));
        assert_eq!(patch.transform_origin, Some(Point::ZERO));
    }

    #[test]
    fn invalid_patches_are_dropped() {
        let mut map = StylePatchMap::new()
            .with_content(StylePatch::EMPTY.with_opacity(0.3))
            .with_overlay(StylePatch::EMPTY.with_opacity(-1.0));
        let rejected = map.retain_valid();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, StyleKey::Overlay);
        assert!(map.content().is_some());
        assert!(map.overlay().is_none());
    }
}
