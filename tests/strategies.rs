use sumbench::random::{generate_array, ChaChaSource};
use sumbench::strategy::{sequential_sum, Sequential, SharedMemory};
use sumbench::traits::*;

#[test]
fn five_element_scenario() {
    let data = [1i32, 2, 3, 4, 5];
    assert_eq!(sequential_sum(&data), 15);
    assert_eq!(SharedMemory::new(5).unwrap().sum(&data[..]).unwrap(), 15);
    assert_eq!(SharedMemory::new(2).unwrap().sum(&data[..]).unwrap(), 15);
}

#[test]
fn integer_parallel_sum_is_exact() {
    let pools: Vec<SharedMemory> = [1, 2, 3, 4, 7, 16]
        .iter()
        .map(|&w| SharedMemory::new(w).unwrap())
        .collect();
    for (seed, len) in [(1u64, 1usize), (2, 2), (3, 999), (4, 100_003)] {
        let data: Vec<i32> = generate_array(len, &mut ChaChaSource::from_seed(seed)).unwrap();
        let reference = sequential_sum(&data);
        for pool in &pools {
            assert_eq!(
                pool.sum(&data[..]).unwrap(),
                reference,
                "len {} workers {}",
                len,
                pool.workers()
            );
        }
    }
}

#[test]
fn float_parallel_sum_within_tolerance() {
    let data: Vec<f64> = generate_array(200_000, &mut ChaChaSource::from_seed(11)).unwrap();
    let reference = sequential_sum(&data);
    for workers in [1, 2, 4, 8] {
        let parallel = SharedMemory::new(workers).unwrap().sum(&data[..]).unwrap();
        assert!(
            parallel.within_tolerance(reference),
            "{} vs {} with {} workers",
            parallel,
            reference,
            workers
        );
    }
}

#[test]
fn one_worker_is_sequential() {
    let data: Vec<f32> = generate_array(10_000, &mut ChaChaSource::from_seed(5)).unwrap();
    let parallel = SharedMemory::new(1).unwrap().sum(&data[..]).unwrap();
    let sequential = Sequential.sum(&data[..]).unwrap();
    assert_eq!(parallel.to_bits(), sequential.to_bits());
}

#[test]
fn parallel_sum_is_reproducible() {
    let data: Vec<f32> = generate_array(50_000, &mut ChaChaSource::from_seed(8)).unwrap();
    let pool = SharedMemory::new(4).unwrap();
    let first = pool.sum(&data[..]).unwrap();
    for _ in 0..5 {
        assert_eq!(pool.sum(&data[..]).unwrap().to_bits(), first.to_bits());
    }
}
