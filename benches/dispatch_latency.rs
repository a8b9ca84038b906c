//! Performance benchmarks for change-notifier.
//!
//! These benchmarks measure:
//! - Dispatch latency as the listener count grows
//! - Registration cost (copy-on-write of the listener list)
//! - Dispatch throughput while another thread keeps registering

use change_notifier::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

#[derive(Debug, Clone)]
struct BenchTarget {
    value: u64,
}

fn notifier_with(listeners: usize, counter: &Arc<AtomicU64>) -> ChangeNotifier {
    let notifier = ChangeNotifier::new();
    for _ in 0..listeners {
        let counter = Arc::clone(counter);
        notifier.register_fn(move |change| {
            if let Some(v) = change.new_value::<u64>() {
                counter.fetch_add(*v, Ordering::Relaxed);
            }
        });
    }
    notifier
}

/// Benchmark dispatch latency for varying listener counts
fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for listeners in [0usize, 1, 8, 64] {
        let counter = Arc::new(AtomicU64::new(0));
        let notifier = notifier_with(listeners, &counter);
        let target = BenchTarget { value: 1 };

        group.throughput(Throughput::Elements(listeners.max(1) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(listeners),
            &listeners,
            |b, _| {
                b.iter(|| {
                    notifier.notify(
                        black_box(&target),
                        "value",
                        Some(&target.value),
                        Some(&0u64),
                    );
                });
            },
        );
    }
    group.finish();
}

/// Benchmark the set-and-notify helper
fn benchmark_set_property(c: &mut Criterion) {
    let counter = Arc::new(AtomicU64::new(0));
    let notifier = notifier_with(4, &counter);
    let mut target = BenchTarget { value: 0 };

    c.bench_function("set_property", |b| {
        let mut next = 0u64;
        b.iter(|| {
            next += 1;
            black_box(set_property(
                &notifier,
                &mut target,
                "value",
                |t| &mut t.value,
                next,
            ));
        });
    });
}

/// Benchmark registration, which copies the listener list each time
fn benchmark_register(c: &mut Criterion) {
    c.bench_function("register_100", |b| {
        b.iter(|| {
            let notifier = ChangeNotifier::new();
            for _ in 0..100 {
                notifier.register_fn(|_| {});
            }
            black_box(notifier.listener_count());
        });
    });
}

/// Benchmark dispatch while a background thread keeps registering listeners
fn benchmark_dispatch_under_registration(c: &mut Criterion) {
    let counter = Arc::new(AtomicU64::new(0));
    let notifier = notifier_with(8, &counter);
    let stop = Arc::new(AtomicBool::new(false));

    let registrar = {
        let notifier = notifier.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) && notifier.listener_count() < 512 {
                notifier.register_fn(|_| {});
                thread::yield_now();
            }
        })
    };

    let target = BenchTarget { value: 1 };
    c.bench_function("dispatch_under_registration", |b| {
        b.iter(|| {
            notifier.notify(black_box(&target), "value", Some(&target.value), None);
        });
    });

    stop.store(true, Ordering::Relaxed);
    let _ = registrar.join();
}

criterion_group!(
    benches,
    benchmark_dispatch,
    benchmark_set_property,
    benchmark_register,
    benchmark_dispatch_under_registration
);
criterion_main!(benches);
