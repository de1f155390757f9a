// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A thumbnail growing into a detail screen.
//!
//! The list screen measures a thumbnail, the detail screen measures the hero
//! image under the same tag, and the shared zoom preset interpolates between
//! them. Each printed frame shows the detail's content transform and mask, and
//! the opacity the list gives its own copy of the thumbnail.
//!
//! Run:
//! - `cargo run -p segue_demos --example shared_bounds`

use kurbo::Size;
use segue_transition::bounds::MeasuredBounds;
use segue_transition::{Route, ScreenOptions, StylePatchMap, TransitionTree, presets};

const TAG: &str = "photo-42";

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut tree = TransitionTree::new(Size::new(390.0, 844.0));
    let root = tree.root();

    let list = tree.push(root, ScreenOptions::default()).unwrap();
    tree.set_bounds(list, TAG, MeasuredBounds::from_page(24.0, 180.0, 96.0, 96.0))
        .unwrap();

    let detail = tree
        .push(root, Route::new(presets::shared_zoom(TAG)).with_active_bound(TAG))
        .unwrap();
    tree.set_bounds(detail, TAG, MeasuredBounds::from_page(0.0, 0.0, 390.0, 390.0))
        .unwrap();

    println!("== Opening ==");
    let mut frame = 0;
    loop {
        let styles = tree.frame(detail).unwrap();
        let below = tree.frame(list).unwrap();
        if frame % 4 == 0 {
            print_frame(frame, &styles, &below);
        }
        if !tree.is_animating() {
            break;
        }
        tree.advance(1.0 / 60.0);
        frame += 1;
    }

    let anim = tree.screen_animation(detail).unwrap();
    println!(
        "settled after {frame} frames at progress {:.3}, interpolator ran {} times",
        anim.progress,
        tree.interpolator_runs(detail).unwrap()
    );
}

fn print_frame(frame: usize, styles: &StylePatchMap, below: &StylePatchMap) {
    let content = styles.content().copied().unwrap_or_default();
    let scale = content.scale.map_or(1.0, |s| s.x);
    let mask = content
        .mask
        .map(|m| format!("{:.0}x{:.0}", m.width(), m.height()))
        .unwrap_or_else(|| "none".into());
    let overlay = styles.overlay().and_then(|o| o.opacity).unwrap_or(0.0);
    let copy = below.tag(TAG).and_then(|t| t.opacity).unwrap_or(1.0);
    println!(
        "  #{frame:<3} scale={scale:.3} mask={mask:<9} overlay={overlay:.2} list copy opacity={copy}"
    );
}
