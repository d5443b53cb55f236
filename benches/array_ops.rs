//! Array operation benchmarks
//!
//! Run with: cargo bench --bench array_ops
//!
//! Groups:
//! - sort: random keys, both storage backends
//! - binary_search: hot lookups over a sorted vector
//! - copy: same-type raw copy vs coerced (widening) copy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rankarray::{
    binary_search, copy, sort, Array, Element, ElementType, NativeBuffer, PrimitiveKind,
    SlotBuffer, StorageEngine,
};

// ============================================================================
// Constants and Utilities
// ============================================================================

/// Fixed seed for reproducible benchmarks
const BENCH_SEED: u64 = 0xDEADBEEF_CAFEBABE;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_ints(count: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);
    (0..count).map(|_| rng.gen()).collect()
}

fn int_array<S: StorageEngine>(values: &[i32]) -> Array<S> {
    Array::from_elements(ElementType::primitive(PrimitiveKind::I32), values.iter().copied())
        .expect("benchmark array")
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for size in SIZES {
        let values = random_ints(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("slots", size), &values, |b, values| {
            b.iter_batched(
                || int_array::<SlotBuffer>(values),
                |mut array| sort(&mut array, None).expect("sort"),
                criterion::BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("native", size), &values, |b, values| {
            b.iter_batched(
                || int_array::<NativeBuffer>(values),
                |mut array| sort(&mut array, None).expect("sort"),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_binary_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_search");
    for size in SIZES {
        let values: Vec<i32> = (0..size as i32).map(|v| v * 2).collect();
        let array = int_array::<NativeBuffer>(&values);
        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let probes: Vec<Element> = (0..1024)
            .map(|_| Element::I32(rng.gen_range(0..size as i32 * 2)))
            .collect();
        group.bench_with_input(BenchmarkId::new("hot_lookup", size), &probes, |b, probes| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % probes.len();
                black_box(binary_search(&array, &probes[i], None).expect("search"))
            })
        });
    }
    group.finish();
}

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");
    for size in SIZES {
        let values = random_ints(size);
        let src = int_array::<NativeBuffer>(&values);
        let len = size as i32;
        group.throughput(Throughput::Elements(size as u64));

        let mut same: Array<NativeBuffer> =
            Array::vector(ElementType::primitive(PrimitiveKind::I32), len).expect("dest");
        group.bench_function(BenchmarkId::new("raw_same_type", size), |b| {
            b.iter(|| copy(&src, 0, &mut same, 0, len).expect("copy"))
        });

        let mut wide: Array<NativeBuffer> =
            Array::vector(ElementType::primitive(PrimitiveKind::I64), len).expect("dest");
        group.bench_function(BenchmarkId::new("coerced_widening", size), |b| {
            b.iter(|| copy(&src, 0, &mut wide, 0, len).expect("copy"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_binary_search, bench_copy);
criterion_main!(benches);
