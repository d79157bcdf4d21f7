//! # Dynamic Array Benchmark
//!
//! Measures:
//! 1. Push from a single slot (repeated doubling) vs. a reserved buffer
//! 2. Front insertion (worst-case tail shift)
//! 3. Typed vs. stride-erased push of the same plain-old-data element

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use darray::{DArray, RawDArray};

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for count in [1_000usize, 100_000, 1_000_000] {
        group.throughput(criterion::Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("growing", count), &count, |b, &count| {
            b.iter(|| {
                let mut array = DArray::new();
                for i in 0..count {
                    array.push(black_box(i as u64));
                }
                array
            });
        });

        group.bench_with_input(BenchmarkId::new("reserved", count), &count, |b, &count| {
            b.iter(|| {
                let mut array = DArray::with_capacity(count);
                for i in 0..count {
                    array.push(black_box(i as u64));
                }
                array
            });
        });
    }

    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_at_front");

    for count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut array = DArray::new();
                array.push(0u32);
                for i in 1..count {
                    array.insert_at(0, black_box(i as u32)).unwrap();
                }
                array
            });
        });
    }

    group.finish();
}

fn bench_raw_vs_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_vs_typed");
    let count = 100_000u64;

    group.bench_function("typed", |b| {
        b.iter(|| {
            let mut array = DArray::new();
            for i in 0..count {
                array.push(black_box([i as f32, i as f32]));
            }
            array
        });
    });

    group.bench_function("raw_pod", |b| {
        b.iter(|| {
            let mut array = RawDArray::new(8).unwrap();
            for i in 0..count {
                array.push_pod(&black_box([i as f32, i as f32])).unwrap();
            }
            array
        });
    });

    group.finish();
}

criterion_group!(benches, bench_push, bench_insert_front, bench_raw_vs_typed);
criterion_main!(benches);
