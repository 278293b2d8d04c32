//! Process groups and their collective operations
//!
//! A `ProcessGroup` is a fixed, static set of cooperating ranks. Rank 0 is the root. Collectives
//! must be entered by every rank in the same order; no rank proceeds past a collective until all
//! ranks have arrived, so a stalled rank stalls the whole group. A rank that gives up calls
//! `abandon()` so that the others can leave their collectives with an error instead.
//!
//! Two implementations are provided:
//!
//! - `LocalGroup` runs every rank on its own thread inside the current process.
//! - `MpiGroup` (feature `mpi`) wraps the MPI world communicator.

use crate::error::Result;
use crate::sample::{Sample, Summand};

pub mod local;
#[cfg(feature = "mpi")]
pub mod world;

pub use self::local::{LocalCommunicator, LocalGroup};
#[cfg(feature = "mpi")]
pub use self::world::MpiGroup;

/// Collective communication patterns used by the distributed benchmark
pub trait ProcessGroup {
    /// Rank of the calling process
    fn rank(&self) -> usize;

    /// Number of processes in the group
    fn size(&self) -> usize;

    /// Rank that owns the input array and receives reductions
    fn root_rank(&self) -> usize {
        0
    }

    /// Whether the calling process is the root
    fn is_root(&self) -> bool {
        self.rank() == self.root_rank()
    }

    /// Block until every process in the group has entered the barrier.
    fn barrier(&self);

    /// Announce that the calling process will not enter any further collective.
    ///
    /// Groups that can recover make every pending and future collective on the other ranks fail.
    /// The default does nothing; an MPI group is torn down with `MPI_Abort` instead.
    fn abandon(&self) {}

    /// Wall-clock time in seconds, comparable between two calls on the same process.
    fn time(&self) -> f64;

    /// Distribute equal chunks of the root's `send` buffer.
    ///
    /// On the root, `send` must be `Some` and hold exactly `recv.len() * size()` elements; rank `r`
    /// receives `send[r * recv.len()..(r + 1) * recv.len()]`. `send` is ignored on other ranks.
    fn scatter_from_root<T: Sample>(&self, send: Option<&[T]>, recv: &mut [T]) -> Result<()>;

    /// Sum `local` over all processes.
    ///
    /// Returns `Some(total)` on the root and `None` everywhere else.
    fn reduce_sum_to_root<S: Summand>(&self, local: S) -> Result<Option<S>>;
}
