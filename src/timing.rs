//! Wall-clock timing

use std::time::Instant;

use once_cell::sync::Lazy;

static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Seconds elapsed since an arbitrary, process-wide point in the past.
///
/// Only differences between two readings are meaningful.
pub fn wall_time() -> f64 {
    EPOCH.elapsed().as_secs_f64()
}

/// Run `f` and return its result together with the elapsed time in seconds.
pub fn timed<R, F: FnOnce() -> R>(f: F) -> (R, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64())
}

/// Running total over the measured passes of a benchmark.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingAccumulator {
    total: f64,
    passes: usize,
}

impl TimingAccumulator {
    /// An empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the duration of one pass.
    pub fn record(&mut self, seconds: f64) {
        self.total += seconds;
        self.passes += 1;
    }

    /// Number of recorded passes
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Sum of all recorded durations
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Mean duration, `0.0` if nothing was recorded
    pub fn average(&self) -> f64 {
        if self.passes == 0 {
            0.0
        } else {
            self.total / self.passes as f64
        }
    }
}

/// `avg(sequential) / avg(parallel)`, or `None` if the parallel average is not positive.
pub fn speedup(sequential: &TimingAccumulator, parallel: &TimingAccumulator) -> Option<f64> {
    let parallel = parallel.average();
    if parallel > 0.0 {
        Some(sequential.average() / parallel)
    } else {
        None
    }
}
