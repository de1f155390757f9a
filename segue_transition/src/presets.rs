// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made screen options.

use kurbo::Vec2;
use segue_bounds::{BoundTag, ZoomOptions};
use segue_gesture::{DirectionSet, GestureAxis, GestureConfig};

use crate::interpolator::InterpolationProps;
use crate::options::ScreenOptions;
use crate::style::{StylePatch, StylePatchMap};

/// Backdrop opacity behind a fully open modal.
const BACKDROP_OPACITY: f64 = 0.5;

/// How far a covered screen drifts left, as a fraction of the width.
const PARALLAX: f64 = 0.3;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A modal that slides up from the bottom edge and is dismissed by dragging down.
///
/// Sheets with snap points rest partway up: a snap point of `0.5` leaves the
/// top half of the screen uncovered.
pub fn slide_from_bottom() -> ScreenOptions {
    ScreenOptions::default()
        .with_gesture(GestureConfig::enabled(GestureAxis::Vertical))
        .with_interpolator(|props: &InterpolationProps<'_>| {
            if !props.is_active() {
                return StylePatchMap::new();
            }
            let p = props.current.progress.max(0.0);
            let height = props.layouts.screen.height;
            StylePatchMap::new()
                .with_content(StylePatch::EMPTY.with_translate(Vec2::new(0.0, (1.0 - p) * height)))
                .with_overlay(StylePatch::EMPTY.with_opacity(BACKDROP_OPACITY * p.min(1.0)))
        })
}

/// A card that slides in from the right edge and is dismissed by dragging right.
///
/// The covered screen drifts left by a fraction of the width.
pub fn slide_from_right() -> ScreenOptions {
    ScreenOptions::default()
        .with_gesture(GestureConfig::enabled(GestureAxis::Horizontal))
        .with_interpolator(|props: &InterpolationProps<'_>| {
            let width = props.layouts.screen.width;
            let t = props.local_progress();
            let x = if props.is_active() {
                (1.0 - t) * width
            } else {
                -PARALLAX * width * t
            };
            StylePatchMap::new().with_content(StylePatch::EMPTY.with_translate(Vec2::new(x, 0.0)))
        })
}

/// A screen that fades and scales in over the previous one.
pub fn zoom_in() -> ScreenOptions {
    ScreenOptions::default()
        .with_gesture(GestureConfig::enabled(DirectionSet::VERTICAL | DirectionSet::HORIZONTAL))
        .with_interpolator(|props: &InterpolationProps<'_>| {
            let t = props.local_progress();
            let content = if props.is_active() {
                StylePatch::EMPTY
                    .with_opacity(t)
                    .with_scale(lerp(0.85, 1.0, t))
            } else {
                StylePatch::EMPTY.with_scale(lerp(1.0, 0.95, t))
            };
            StylePatchMap::new().with_content(content)
        })
}

/// A screen that grows out of the element tagged `tag` on the screen below.
///
/// Push the destination with a route whose active bound is `tag`, and measure
/// `tag` on both screens. Dragging moves the screen with the finger without
/// changing progress; a release past the threshold zooms back into the source.
pub fn shared_zoom(tag: impl Into<BoundTag>) -> ScreenOptions {
    let tag = tag.into();
    ScreenOptions::default()
        .with_gesture(
            GestureConfig::enabled(DirectionSet::VERTICAL | DirectionSet::HORIZONTAL)
                .with_drives_progress(false),
        )
        .with_interpolator(move |props: &InterpolationProps<'_>| {
            let zoom = props.bounds.navigation().zoom(
                &tag,
                ZoomOptions {
                    gestures: Some(props.gestures.translation()),
                    ..ZoomOptions::default()
                },
            );
            let mut content = StylePatch::from(zoom.content);
            content.mask = zoom.mask;
            StylePatchMap::new()
                .with_content(content)
                .with_overlay(StylePatch::EMPTY.with_opacity(zoom.overlay_opacity))
                .with_tag(&tag, StylePatch::EMPTY.with_opacity(zoom.element_opacity))
        })
}
