//! Fork-join summation over a thread pool

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{sequential_sum, Summation};
use crate::error::{ConfigError, Result};
use crate::partition::Partition;
use crate::sample::{Sample, Summand};

/// Sums an array with a fixed number of worker threads.
///
/// The array is split into `workers` contiguous ranges (see `Partition`), one partial sum is
/// computed per range inside a dedicated pool, and the partials are added in worker order once all
/// of them are available. For a given array and worker count the result is therefore the same on
/// every call.
pub struct SharedMemory {
    pool: ThreadPool,
    workers: usize,
}

impl SharedMemory {
    /// Start a pool of `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ConfigError::NonPositive {
                var: "worker count",
                value: 0,
            }
            .into());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sum-worker-{}", i))
            .build()?;
        debug!("started pool of {} workers", workers);
        Ok(SharedMemory { pool, workers })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// One partial sum per worker, in worker order.
    pub fn partial_sums<T: Sample>(&self, data: &[T]) -> Result<Vec<T::Sum>> {
        let partition = Partition::new(data.len(), self.workers)?;
        Ok(self.pool.install(|| {
            partition
                .ranges()
                .par_iter()
                .map(|range| sequential_sum(&data[range.clone()]))
                .collect()
        }))
    }
}

impl<T: Sample> Summation<T> for SharedMemory {
    fn name(&self) -> &str {
        "shared-memory"
    }

    fn sum(&self, data: &[T]) -> Result<T::Sum> {
        let partials = self.partial_sums(data)?;
        Ok(partials
            .into_iter()
            .fold(T::Sum::zero(), |total, partial| total + partial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_elements() {
        let data = [1i32, 2, 3, 4, 5];
        for workers in [1, 2, 5, 8] {
            let strategy = SharedMemory::new(workers).unwrap();
            assert_eq!(strategy.sum(&data[..]).unwrap(), 15, "{} workers", workers);
        }
    }

    #[test]
    fn one_partial_per_worker() {
        let strategy = SharedMemory::new(3).unwrap();
        let partials = strategy.partial_sums(&[1i32, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(partials, [6, 15, 7]);
    }

    #[test]
    fn single_worker_matches_sequential_bit_for_bit() {
        let data: Vec<f32> = (0..50_000).map(|i| ((i * 7919) % 1000) as f32 / 1000.0).collect();
        let strategy = SharedMemory::new(1).unwrap();
        let parallel: f32 = strategy.sum(&data[..]).unwrap();
        assert_eq!(parallel.to_bits(), sequential_sum(&data).to_bits());
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(SharedMemory::new(0).is_err());
    }
}
