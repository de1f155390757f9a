// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use segue_transition::gesture::{AxisRegistry, DirectionSet, GestureAxis, GestureConfig};
use segue_transition::{ScreenOptions, TransitionSpec, TransitionSpecs, TransitionTree};

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    for &depth in &[4_u32, 32, 256] {
        group.bench_function(format!("claim_release_top_d{depth}"), |b| {
            b.iter_batched(
                || {
                    let mut reg = AxisRegistry::new();
                    for s in 0..depth {
                        reg.claim_directions(0_u32, DirectionSet::BIDIRECTIONAL, s);
                    }
                    reg
                },
                |mut reg| {
                    for s in (0..depth).rev() {
                        reg.release_screen(0, s);
                        black_box(reg.owner(0, GestureAxis::Vertical));
                    }
                },
                BatchSize::SmallInput,
            );
        });

        // Releases from the bottom never change the owner but walk the whole stack.
        group.bench_function(format!("release_buried_d{depth}"), |b| {
            b.iter_batched(
                || {
                    let mut reg = AxisRegistry::new();
                    for s in 0..depth {
                        reg.claim(0_u32, GestureAxis::Vertical, s);
                    }
                    reg
                },
                |mut reg| {
                    for s in 0..depth {
                        black_box(reg.release(0, GestureAxis::Vertical, s));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Resolution through a chain of nested navigators that claim nothing.
    for &nesting in &[1_u32, 8, 64] {
        let mut reg = AxisRegistry::new();
        reg.claim_directions(0_u32, DirectionSet::BIDIRECTIONAL, 0_u32);
        let parent = |n: &u32| n.checked_sub(1);
        group.bench_function(format!("resolve_inherited_n{nesting}"), |b| {
            b.iter(|| black_box(reg.resolved_axes(nesting, 0, &parent)));
        });
    }

    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let options = ScreenOptions::default()
        .with_gesture(GestureConfig::enabled(GestureAxis::Vertical))
        .with_transition_spec(TransitionSpecs::both(TransitionSpec::timing(0.1)));

    for &n in &[8_usize, 64] {
        group.bench_function(format!("push_dismiss_settle_n{n}"), |b| {
            b.iter_batched(
                || TransitionTree::new(Size::new(390.0, 844.0)),
                |mut tree| {
                    let root = tree.root();
                    for _ in 0..n {
                        tree.push(root, options.clone()).unwrap();
                    }
                    while let Ok(Some(_)) = tree.pop(root) {}
                    while tree.is_animating() {
                        tree.advance(1.0 / 60.0);
                    }
                    black_box(tree.drain_events().count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_registry, bench_tree);
criterion_main!(benches);
