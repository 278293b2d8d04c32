//! The MPI world communicator as a `ProcessGroup`

use conv::ConvUtil;
use log::debug;
use mpi::collective::SystemOperation;
use mpi::environment::Universe;
use mpi::topology::{Rank, SimpleCommunicator};
use mpi::traits::*;

use super::ProcessGroup;
use crate::error::{BenchError, Result};
use crate::sample::{Sample, Summand};

/// All processes started by the MPI launcher.
///
/// Initializes MPI on construction and finalizes it on drop.
pub struct MpiGroup {
    world: SimpleCommunicator,
    rank: usize,
    size: usize,
    // dropped last: finalizes MPI
    _universe: Universe,
}

impl MpiGroup {
    /// Initialize MPI and join the world communicator.
    pub fn initialize() -> Result<Self> {
        let universe = mpi::initialize()
            .ok_or_else(|| BenchError::collective("initialize", "MPI is already initialized"))?;
        let world = universe.world();
        let rank = world
            .rank()
            .value_as::<usize>()
            .map_err(|e| BenchError::collective("initialize", e.to_string()))?;
        let size = world
            .size()
            .value_as::<usize>()
            .map_err(|e| BenchError::collective("initialize", e.to_string()))?;
        debug!("rank {} of {} joined the world communicator", rank, size);
        Ok(MpiGroup {
            world,
            rank,
            size,
            _universe: universe,
        })
    }

    /// Terminate every process in the group with `code`.
    pub fn abort(&self, code: i32) -> ! {
        self.world.abort(code)
    }

    fn mpi_root_rank(&self) -> Result<Rank> {
        self.root_rank()
            .value_as::<Rank>()
            .map_err(|_| BenchError::collective("root", "root rank exceeds the MPI rank range"))
    }
}

impl ProcessGroup for MpiGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.world.barrier();
    }

    fn time(&self) -> f64 {
        mpi::time()
    }

    fn scatter_from_root<T: Sample>(&self, send: Option<&[T]>, recv: &mut [T]) -> Result<()> {
        recv.len()
            .value_as::<mpi::Count>()
            .map_err(|_| BenchError::collective("scatter", "chunk exceeds the MPI count range"))?;
        let root = self.world.process_at_rank(self.mpi_root_rank()?);

        if self.is_root() {
            let send =
                send.ok_or_else(|| BenchError::collective("scatter", "root has no send buffer"))?;
            if send.len() != recv.len() * self.size {
                return Err(BenchError::collective(
                    "scatter",
                    format!(
                        "root buffer holds {} elements, expected {}",
                        send.len(),
                        recv.len() * self.size
                    ),
                ));
            }
            root.scatter_into_root(send, recv);
        } else {
            root.scatter_into(recv);
        }
        Ok(())
    }

    fn reduce_sum_to_root<S: Summand>(&self, local: S) -> Result<Option<S>> {
        let root = self.world.process_at_rank(self.mpi_root_rank()?);
        if self.is_root() {
            let mut total = S::zero();
            root.reduce_into_root(&local, &mut total, SystemOperation::sum());
            Ok(Some(total))
        } else {
            root.reduce_into(&local, SystemOperation::sum());
            Ok(None)
        }
    }
}
