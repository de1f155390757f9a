// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis ownership falling back as screens leave.
//!
//! Three stacked screens claim the vertical axis. Dismissing them one by one
//! hands the axis back to the next surviving claim.
//!
//! Run:
//! - `cargo run -p segue_demos --example claim_fallback`

use kurbo::Size;
use segue_transition::gesture::{GestureAxis, GestureConfig};
use segue_transition::{ScreenOptions, TransitionSpec, TransitionSpecs, TransitionTree, TreeEvent};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut tree = TransitionTree::new(Size::new(390.0, 844.0));
    let root = tree.root();
    let options = ScreenOptions::default()
        .with_gesture(GestureConfig::enabled(GestureAxis::Vertical))
        .with_transition_spec(TransitionSpecs::both(TransitionSpec::timing(0.3)));

    let mut screens = Vec::new();
    for _ in 0..3 {
        let key = tree.push(root, options.clone()).unwrap();
        screens.push(key);
    }
    settle(&mut tree);

    println!("== Claims ==");
    print_owner(&tree);

    while let Some(key) = screens.pop() {
        tree.dismiss(key).unwrap();
        settle(&mut tree);
        for event in tree.drain_events() {
            if let TreeEvent::Unmounted { screen, .. } = event {
                println!("  unmounted {screen:?}");
            }
        }
        print_owner(&tree);
    }
}

fn settle(tree: &mut TransitionTree) {
    while tree.is_animating() {
        tree.advance(1.0 / 60.0);
    }
}

fn print_owner(tree: &TransitionTree) {
    let owner = tree.registry().owner(tree.root(), GestureAxis::Vertical);
    println!("  vertical owner: {owner:?}");
}
