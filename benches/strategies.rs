use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sumbench::random::{generate_array, ChaChaSource};
use sumbench::strategy::{sequential_sum, SharedMemory};
use sumbench::traits::*;

const SIZES: [usize; 3] = [100_000, 1_000_000, 10_000_000];

fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential");
    for size in SIZES {
        let data: Vec<f64> = generate_array(size, &mut ChaChaSource::from_seed(0)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sequential_sum(black_box(&data[..])))
        });
    }
    group.finish();
}

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared");
    let size = 10_000_000;
    let data: Vec<f64> = generate_array(size, &mut ChaChaSource::from_seed(0)).unwrap();
    group.throughput(Throughput::Elements(size as u64));
    for workers in [1, 2, 4, 8] {
        let pool = SharedMemory::new(workers).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &data, |b, data| {
            b.iter(|| pool.sum(black_box(&data[..])).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequential, bench_shared);
criterion_main!(benches);
