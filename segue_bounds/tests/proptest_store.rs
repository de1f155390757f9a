// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the bound store and the transform builder.
//!
//! 1. A stored rectangle reads back unchanged until its screen is cleared.
//! 2. Tags derived per list item never observe each other's measurements.
//! 3. At local progress 1 the destination's style is the identity.

use kurbo::Size;
use proptest::prelude::*;
use segue_bounds::{BoundStore, BoundsContext, BoundsQuery, MeasuredBounds};

fn bounds_strategy() -> impl Strategy<Value = MeasuredBounds> {
    (
        -500.0..500.0_f64,
        -500.0..500.0_f64,
        1.0..400.0_f64,
        1.0..400.0_f64,
    )
        .prop_map(|(x, y, w, h)| MeasuredBounds::from_page(x, y, w, h))
}

proptest! {
    #[test]
    fn round_trip_until_cleared(screen in 0_u32..16, m in bounds_strategy()) {
        let mut store = BoundStore::new();
        prop_assert!(!store.has_bounds(screen, "tag"));
        store.set_bounds(screen, "tag", m);
        prop_assert_eq!(store.get_bounds(screen, "tag"), Some(m));
        store.clear_screen(screen);
        prop_assert!(!store.has_bounds(screen, "tag"));
    }

    #[test]
    fn item_tags_are_independent(
        items in prop::collection::vec(bounds_strategy(), 1..12),
    ) {
        let mut store = BoundStore::new();
        for (i, m) in items.iter().enumerate() {
            store.set_bounds(1_u32, format!("multi-img-{i}"), *m);
        }
        for (i, m) in items.iter().enumerate() {
            let tag = format!("multi-img-{i}");
            prop_assert_eq!(store.get_bounds(1, &tag), Some(*m));
        }
    }

    #[test]
    fn settled_destination_is_identity(a in bounds_strategy(), b in bounds_strategy()) {
        let mut store = BoundStore::new();
        store.set_bounds(1_u32, "hero", a);
        store.set_bounds(2, "hero", b);
        let ctx = BoundsContext::new(&store, 2, Size::new(400.0, 800.0))
            .with_previous(Some(1))
            .with_progress(1.0);
        let style = ctx.bounds(&BoundsQuery::new("hero"));
        prop_assert!((style.translate.x).abs() < 1e-6);
        prop_assert!((style.translate.y).abs() < 1e-6);
        prop_assert!((style.scale.x - 1.0).abs() < 1e-9);
        prop_assert!((style.scale.y - 1.0).abs() < 1e-9);
    }
}
