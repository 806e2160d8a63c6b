//! Benchmarks for the key registry and keyed output.
//!
//! This benchmark suite measures the per-call cost of key filtering:
//! - Key lookup hit and miss against registries of varying size
//! - Key enable (full copy plus compare-and-swap)
//! - `to` with the key disabled (gate only) and enabled (full render)
//!
//! Run with: `cargo bench -p clog -- key`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use clog::{KeyRegistry, Logger, OutputFlags};

// ============================================================================
// Registry
// ============================================================================

fn populated(count: usize) -> KeyRegistry {
    let registry = KeyRegistry::new();
    for i in 0..count {
        registry.enable(&format!("key-{i}"));
    }
    registry
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_lookup");
    for size in [1, 16, 256] {
        let registry = populated(size);
        group.bench_with_input(BenchmarkId::new("hit", size), &registry, |b, registry| {
            b.iter(|| registry.is_enabled(black_box("key-0")));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &registry, |b, registry| {
            b.iter(|| registry.is_enabled(black_box("absent")));
        });
    }
    group.finish();
}

fn bench_enable(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_enable");
    for size in [1, 16, 256] {
        let registry = populated(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| registry.enable(black_box("key-0")));
        });
    }
    group.finish();
}

// ============================================================================
// Keyed Output
// ============================================================================

fn bench_to(c: &mut Criterion) {
    let logger = Logger::with_output(std::io::sink());
    logger.set_flags(OutputFlags::NONE);

    c.bench_function("to_disabled", |b| {
        b.iter(|| logger.to(black_box("off"), format_args!("hello {}", black_box(1))));
    });

    logger.enable_key("on");
    c.bench_function("to_enabled", |b| {
        b.iter(|| logger.to(black_box("on"), format_args!("hello {}", black_box(1))));
    });
}

criterion_group!(
    name = key_benchmarks;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(3));
    targets = bench_lookup, bench_enable, bench_to
);

criterion_main!(key_benchmarks);
