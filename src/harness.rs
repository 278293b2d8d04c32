//! Benchmark drivers
//!
//! Each driver generates its input, runs one unmeasured pass, then `iteration_count` measured
//! passes. Every parallel result is checked against a sequential reference sum; the first
//! disagreement ends the run with `BenchError::Mismatch` and no report.

use log::{debug, info, warn};

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::group::ProcessGroup;
use crate::random::{generate_array, zeroed, RandomSource};
use crate::report::{DistributedReport, SequentialReport, SharedReport};
use crate::sample::{Sample, Summand};
use crate::strategy::{sequential_sum, Distributed, Summation};
use crate::timing::{timed, TimingAccumulator};

/// Fail unless `value` agrees with `reference` within the tolerance of its type.
pub fn verify_sum<S: Summand>(value: S, reference: S) -> Result<()> {
    if value.within_tolerance(reference) {
        Ok(())
    } else {
        Err(BenchError::Mismatch {
            parallel: value.to_string(),
            reference: reference.to_string(),
            tolerance: S::tolerance(),
        })
    }
}

/// Time the single-threaded baseline.
///
/// The first run produces the reference sum; every measured pass must reproduce it.
pub fn run_sequential<T, R>(config: &BenchConfig, source: &mut R) -> Result<SequentialReport<T::Sum>>
where
    T: Sample,
    R: RandomSource<T> + ?Sized,
{
    info!(
        "sequential benchmark: {} elements, {} passes",
        config.array_size, config.iteration_count
    );
    let data: Vec<T> = generate_array(config.array_size, source)?;

    let (reference_sum, first_run) = timed(|| sequential_sum(&data));
    debug!("reference sum {} in {:.6} s", reference_sum, first_run);

    let mut timing = TimingAccumulator::new();
    for pass in 0..config.iteration_count {
        let (sum, elapsed) = timed(|| sequential_sum(&data));
        timing.record(elapsed);
        debug!("pass {}: {} in {:.6} s", pass, sum, elapsed);
        verify_sum(sum, reference_sum)?;
    }

    Ok(SequentialReport {
        array_size: config.array_size,
        reference_sum,
        first_run,
        timing,
    })
}

/// Time a parallel strategy against the sequential baseline.
///
/// Each measured pass times one sequential and one `strategy` sum of the same array. The report
/// records `config.worker_count` as the number of workers; `SharedMemory::new` with that count is
/// the strategy the `shared_sum` binary measures.
pub fn run_shared<T, R>(
    config: &BenchConfig,
    strategy: &dyn Summation<T>,
    source: &mut R,
) -> Result<SharedReport<T::Sum>>
where
    T: Sample,
    R: RandomSource<T> + ?Sized,
{
    info!(
        "{} benchmark: {} elements, {} workers, {} passes",
        strategy.name(),
        config.array_size,
        config.worker_count,
        config.iteration_count
    );
    let data: Vec<T> = generate_array(config.array_size, source)?;

    let (reference_sum, first_run) = timed(|| sequential_sum(&data));
    debug!("reference sum {} in {:.6} s", reference_sum, first_run);

    let warm_up = strategy.sum(&data)?;
    verify_sum(warm_up, reference_sum)?;

    let mut sequential = TimingAccumulator::new();
    let mut parallel = TimingAccumulator::new();
    let mut parallel_sum = warm_up;
    for pass in 0..config.iteration_count {
        let (_, elapsed) = timed(|| sequential_sum(&data));
        sequential.record(elapsed);

        let (sum, elapsed) = timed(|| strategy.sum(&data));
        let sum = sum?;
        parallel.record(elapsed);
        debug!(
            "pass {}: {} sum {} in {:.6} s",
            pass,
            strategy.name(),
            sum,
            elapsed
        );
        verify_sum(sum, reference_sum)?;
        parallel_sum = sum;
    }

    Ok(SharedReport {
        array_size: config.array_size,
        workers: config.worker_count,
        reference_sum,
        parallel_sum,
        first_run,
        sequential,
        parallel,
    })
}

/// Time the distributed strategy on every rank of `group`.
///
/// Must be called collectively. Only the root reads `source`: before each pass it reseeds with
/// `base_seed + rank + pass`, refills the array and times the sequential reference sum. The
/// parallel phase is timed on the root from just after a barrier until the reduction has
/// completed. Returns the report on the root and `None` elsewhere.
///
/// A rank that fails abandons the group, so a mismatch detected on the root makes the next
/// collective fail on every other rank rather than leaving them waiting.
pub fn run_distributed<G, T, R>(
    group: &G,
    config: &BenchConfig,
    source: &mut R,
) -> Result<Option<DistributedReport<T::Sum>>>
where
    G: ProcessGroup,
    T: Sample,
    R: RandomSource<T> + ?Sized,
{
    let result = distributed_passes(group, config, source);
    if let Err(err) = &result {
        warn!("rank {} stops: {}", group.rank(), err);
        group.abandon();
    }
    result
}

fn distributed_passes<G, T, R>(
    group: &G,
    config: &BenchConfig,
    source: &mut R,
) -> Result<Option<DistributedReport<T::Sum>>>
where
    G: ProcessGroup,
    T: Sample,
    R: RandomSource<T> + ?Sized,
{
    let n = config.array_size;
    let strategy = Distributed::new(group, n)?;
    let partition = strategy.partition();

    if group.is_root() {
        info!(
            "distributed benchmark: {} elements, {} processes, chunk {}, {} passes",
            n,
            group.size(),
            partition.chunk_len(),
            config.iteration_count
        );
        if n < group.size() {
            warn!("array size {} is smaller than the number of processes {}", n, group.size());
        }
    }

    let root_seed = config.base_seed().wrapping_add(group.rank() as u64);
    let mut data: Option<Vec<T>> = if group.is_root() {
        Some(zeroed(partition.padded_len())?)
    } else {
        None
    };
    let mut local: Vec<T> = strategy.local_buffer()?;

    if let Some(data) = data.as_mut() {
        source.reseed(root_seed);
        source.fill(&mut data[..n]);
        let warm_up = sequential_sum(&data[..n]);
        debug!("warm-up sum {}", warm_up);
    }
    group.barrier();

    let mut sequential = TimingAccumulator::new();
    let mut parallel = TimingAccumulator::new();
    let mut sums = None;
    for pass in 0..config.iteration_count {
        let mut reference = None;
        if let Some(data) = data.as_mut() {
            source.reseed(root_seed.wrapping_add(pass as u64));
            source.fill(&mut data[..n]);
            let start = group.time();
            reference = Some(sequential_sum(&data[..n]));
            sequential.record(group.time() - start);
        }

        group.barrier();
        let start = group.time();
        let total = strategy.sum(group, data.as_deref(), &mut local)?;
        let elapsed = group.time() - start;

        if let (Some(total), Some(reference)) = (total, reference) {
            parallel.record(elapsed);
            debug!(
                "pass {}: total {} reference {} in {:.6} s",
                pass, total, reference, elapsed
            );
            verify_sum(total, reference)?;
            sums = Some((total, reference));
        }
    }

    Ok(sums.map(|(total_sum, reference_sum)| DistributedReport {
        array_size: n,
        processes: group.size(),
        reference_sum,
        total_sum,
        sequential,
        parallel,
    }))
}
