//! Splitting an array into contiguous per-worker ranges

use std::ops::Range;

use smallvec::SmallVec;

use crate::error::ConfigError;

type Ranges = SmallVec<[Range<usize>; 16]>;

/// A stable split of `len` elements across `workers` workers.
///
/// Every worker is assigned a chunk of `ceil(len / workers)` slots. Worker `i` owns the elements
/// `[i * chunk, (i + 1) * chunk)` clamped to `len`, so trailing workers may own fewer elements or
/// none at all. The ranges are disjoint and together cover `0..len` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    chunk: usize,
    ranges: Ranges,
}

impl Partition {
    /// Split `len` elements across `workers` workers.
    pub fn new(len: usize, workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NonPositive {
                var: "worker count",
                value: 0,
            });
        }
        let chunk = len / workers + usize::from(len % workers != 0);
        let ranges = (0..workers)
            .map(|i| {
                let start = i.saturating_mul(chunk).min(len);
                let end = (i + 1).saturating_mul(chunk).min(len);
                start..end
            })
            .collect();
        Ok(Partition { len, chunk, ranges })
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to split
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of workers
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// Slots per worker, including padding
    pub fn chunk_len(&self) -> usize {
        self.chunk
    }

    /// Length of a buffer holding one full chunk for every worker, saturating at `usize::MAX`
    pub fn padded_len(&self) -> usize {
        self.chunk.saturating_mul(self.workers())
    }

    /// All ranges in worker order
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// The range owned by `worker`
    pub fn range(&self, worker: usize) -> Range<usize> {
        self.ranges[worker].clone()
    }

    /// Number of real (non-padding) elements in the chunk of `worker`
    pub fn valid_len(&self, worker: usize) -> usize {
        self.ranges[worker].len()
    }
}
