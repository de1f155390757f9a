// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A snapping sheet inside a nested navigator.
//!
//! The home screen claims both axes of the root navigator. A sheet pushed into
//! a navigator nested inside home claims the vertical axis, which shadows the
//! host's vertical claim while the horizontal one still resolves to home. The
//! sheet then gets dragged between its snap points and finally dismissed.
//!
//! Run:
//! - `cargo run -p segue_demos --example nested_sheet`

use kurbo::{Size, Vec2};
use segue_transition::gesture::{DirectionSet, GestureAxis, GestureConfig, PanEvent};
use segue_transition::{ScreenKey, ScreenOptions, TransitionTree, TreeEvent, presets};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut tree = TransitionTree::new(Size::new(390.0, 844.0));
    let home = tree
        .push(
            tree.root(),
            ScreenOptions::default()
                .with_gesture(GestureConfig::enabled(DirectionSet::BIDIRECTIONAL)),
        )
        .unwrap();
    let nested = tree.add_navigator(home).unwrap();

    let sheet_gesture = GestureConfig::enabled(GestureAxis::Vertical)
        .with_snap_points([0.4, 1.0])
        .with_initial_snap_index(0);
    let sheet = tree
        .push(nested, presets::slide_from_bottom().with_gesture(sheet_gesture))
        .unwrap();
    settle(&mut tree);

    println!("== Ownership ==");
    println!("  home owns  {:?}", tree.owned_axes(home).unwrap());
    println!("  sheet owns {:?}", tree.owned_axes(sheet).unwrap());

    println!("== Drag up to the full detent ==");
    drag(&mut tree, sheet, -300.0, -900.0);
    report(&tree, sheet);

    println!("== Fling down ==");
    drag(&mut tree, sheet, 500.0, 2400.0);
    report(&tree, sheet);

    for event in tree.drain_events() {
        if matches!(
            event,
            TreeEvent::DismissRequested { .. } | TreeEvent::Unmounted { .. }
        ) {
            println!("  {event:?}");
        }
    }
    println!("  home owns  {:?}", tree.owned_axes(home).unwrap());
}

fn drag(tree: &mut TransitionTree, key: ScreenKey, dy: f64, velocity: f64) {
    let mut session = tree.session(key).unwrap();
    session.handle_pan(PanEvent::began()).unwrap();
    for step in 1..=10 {
        let t = Vec2::new(0.0, dy * f64::from(step) / 10.0);
        let action = session
            .handle_pan(PanEvent::changed(t, Vec2::new(0.0, velocity)))
            .unwrap();
        if step == 1 || step == 10 {
            println!("  {action:?}");
        }
    }
    let action = session
        .handle_pan(PanEvent::ended(Vec2::new(0.0, dy), Vec2::new(0.0, velocity)))
        .unwrap();
    println!("  release: {action:?}");
    settle(tree);
}

fn report(tree: &TransitionTree, key: ScreenKey) {
    match tree.screen_animation(key) {
        Ok(anim) => println!(
            "  progress {:.2}, snap {:?}",
            anim.progress, anim.snap_index
        ),
        Err(err) => println!("  {err}"),
    }
}

fn settle(tree: &mut TransitionTree) {
    while tree.is_animating() {
        tree.advance(1.0 / 60.0);
    }
}
