// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use segue_transition::bounds::{
    BoundStore, BoundsContext, BoundsQuery, MeasuredBounds, Method, ScaleMode, Target, ZoomOptions,
};

const SCREEN: Size = Size::new(390.0, 844.0);

fn grid_store(n: usize) -> (BoundStore<u32>, Vec<String>) {
    let mut store = BoundStore::new();
    let mut tags = Vec::with_capacity(n);
    for i in 0..n {
        let tag = format!("cell-{i}");
        let (col, row) = ((i % 4) as f64, (i / 4) as f64);
        store.set_bounds(
            1,
            tag.as_str(),
            MeasuredBounds::from_page(col * 96.0, row * 96.0, 96.0, 96.0),
        );
        store.set_bounds(2, tag.as_str(), MeasuredBounds::from_page(0.0, 0.0, 390.0, 390.0));
        tags.push(tag);
    }
    (store, tags)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");

    for &n in &[16_usize, 256] {
        let (store, tags) = grid_store(n);
        let queries: Vec<BoundsQuery> = tags
            .iter()
            .map(|t| {
                BoundsQuery::new(t.as_str())
                    .with_method(Method::Content)
                    .with_scale_mode(ScaleMode::Uniform)
            })
            .collect();
        let ctx = BoundsContext::new(&store, 2, SCREEN)
            .with_previous(Some(1))
            .with_progress(0.5);

        group.bench_function(format!("bounds_all_tags_n{n}"), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(ctx.bounds(q));
                }
            });
        });

        let fullscreen: Vec<BoundsQuery> = queries
            .iter()
            .cloned()
            .map(|q| q.with_target(Target::Fullscreen))
            .collect();
        group.bench_function(format!("bounds_fullscreen_n{n}"), |b| {
            b.iter(|| {
                for q in &fullscreen {
                    black_box(ctx.bounds(q));
                }
            });
        });

        group.bench_function(format!("zoom_n{n}"), |b| {
            b.iter(|| {
                for t in &tags {
                    black_box(ctx.navigation().zoom(t.as_str(), ZoomOptions::default()));
                }
            });
        });
    }

    group.bench_function("set_bounds_clear_screen_n256", |b| {
        b.iter_batched(
            || grid_store(256).0,
            |mut store| black_box(store.clear_screen(1)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
