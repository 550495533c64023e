//! Reconciliation benchmarks: a scroll step must stay O(window), never
//! O(list), so list size should not move the needle.
//!
//! Run with: cargo bench --bench reconcile

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lazyrow::manager::{
    ResourceDisposer, ResourceLoader, RetryPolicy, RetryScheduler, SlotObserver,
    WindowedResourceManager,
};
use lazyrow::model::{ItemIndex, ItemPosition, ListLayout, RequestToken};
use std::time::Duration;

/// Environment that does no work, isolating the manager's own
/// bookkeeping cost.
#[derive(Debug, Default)]
struct NullEnv;

impl ResourceLoader for NullEnv {
    fn begin_load(&mut self, _index: ItemIndex, _token: RequestToken) {}
}

impl ResourceDisposer<u64> for NullEnv {
    fn dispose(&mut self, _resource: u64) {}
}

impl SlotObserver<u64> for NullEnv {
    fn slot_created(&mut self, _index: ItemIndex, _position: ItemPosition) {}
    fn slot_loaded(&mut self, _index: ItemIndex, _resource: &u64, _position: ItemPosition) {}
    fn slot_failed(&mut self, _index: ItemIndex) {}
    fn slot_removed(&mut self, _index: ItemIndex) {}
}

impl RetryScheduler for NullEnv {
    fn schedule_retry(&mut self, _index: ItemIndex, _token: RequestToken, _delay: Duration) {}
}

fn make_manager(items: usize) -> WindowedResourceManager<u64> {
    let layout = ListLayout::new(items, 8.0, 1.0, 40.0, 3, 1).expect("valid layout");
    WindowedResourceManager::new(
        layout,
        RetryPolicy {
            max_retries: 1,
            delay: Duration::from_millis(500),
        },
    )
}

/// Scroll steps across list sizes spanning three orders of magnitude.
/// Flat results here confirm the tracked set, not the list, drives cost.
fn benchmark_scroll_step_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_step_scaling");

    for items in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, &items| {
            b.iter_batched(
                || {
                    let mut manager = make_manager(items);
                    let mut env = NullEnv::default();
                    manager.set_scroll(0.0, &mut env);
                    (manager, env)
                },
                |(mut manager, mut env)| {
                    // One row's worth of scroll: a typical frame step.
                    manager.set_scroll(black_box(-9.0), &mut env);
                    (manager, env)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// A full sweep from top to bottom in viewport-sized jumps.
fn benchmark_full_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_sweep");
    group.sample_size(20);

    for items in [10_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, &items| {
            b.iter_batched(
                || make_manager(items),
                |mut manager| {
                    let mut env = NullEnv::default();
                    let max = manager.layout().max_scroll();
                    let step = manager.layout().viewport_height();
                    let mut offset = 0.0;
                    while offset > -max {
                        manager.set_scroll(black_box(offset), &mut env);
                        offset -= step;
                    }
                    env
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// The idempotent fast path: same offset twice should be near-free.
fn benchmark_idempotent_set_scroll(c: &mut Criterion) {
    c.bench_function("set_scroll_idempotent", |b| {
        let mut manager = make_manager(100_000);
        let mut env = NullEnv::default();
        manager.set_scroll(-500.0, &mut env);
        b.iter(|| {
            manager.set_scroll(black_box(-500.0), &mut env);
        });
    });
}

criterion_group!(
    benches,
    benchmark_scroll_step_scaling,
    benchmark_full_sweep,
    benchmark_idempotent_set_scroll
);
criterion_main!(benches);
