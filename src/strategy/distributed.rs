//! Scatter / local sum / reduce over a process group

use super::sequential_sum;
use crate::error::{BenchError, Result};
use crate::group::ProcessGroup;
use crate::partition::Partition;
use crate::random::zeroed;
use crate::sample::Sample;

/// One distributed summation pass.
///
/// The root owns the whole input array in a buffer of `partition().padded_len()` elements whose
/// tail beyond the real data is zero. Every rank, the root included, receives one chunk of
/// `partition().chunk_len()` elements and sums only its `valid_len()` real elements, so neither
/// padding nor a short last chunk changes the total.
#[derive(Debug, Clone)]
pub struct Distributed {
    partition: Partition,
}

impl Distributed {
    /// Prepare to sum arrays of `len` elements across the ranks of `group`.
    pub fn new<G: ProcessGroup>(group: &G, len: usize) -> Result<Self> {
        Ok(Distributed {
            partition: Partition::new(len, group.size())?,
        })
    }

    /// How the array is split across ranks
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// A zeroed buffer for the local chunk of one rank.
    pub fn local_buffer<T: Sample>(&self) -> Result<Vec<T>> {
        zeroed(self.partition.chunk_len())
    }

    /// Copy `data` into a zero-padded buffer suitable as the root's send buffer.
    pub fn pad<T: Sample>(&self, data: &[T]) -> Result<Vec<T>> {
        let mut padded = zeroed(self.partition.padded_len())?;
        padded[..data.len()].copy_from_slice(data);
        Ok(padded)
    }

    /// Scatter the root's `send` buffer, sum the local chunk and reduce to the root.
    ///
    /// `send` is only read on the root. `local` must hold `chunk_len()` elements. Returns the
    /// total on the root and `None` on every other rank.
    pub fn sum<G, T>(&self, group: &G, send: Option<&[T]>, local: &mut [T]) -> Result<Option<T::Sum>>
    where
        G: ProcessGroup,
        T: Sample,
    {
        if local.len() != self.partition.chunk_len() {
            return Err(BenchError::collective(
                "scatter",
                format!(
                    "local buffer holds {} elements, expected {}",
                    local.len(),
                    self.partition.chunk_len()
                ),
            ));
        }
        group.scatter_from_root(send, local)?;
        let valid = self.partition.valid_len(group.rank());
        let partial = sequential_sum(&local[..valid]);
        group.reduce_sum_to_root(partial)
    }
}
