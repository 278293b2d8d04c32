//! A process group whose ranks are threads of the current process

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use log::{debug, warn};

use super::ProcessGroup;
use crate::error::{BenchError, ConfigError, Result};
use crate::sample::{Sample, Summand};
use crate::timing;

type Slot = Option<Box<dyn Any + Send>>;

struct Shared {
    gate: Gate,
    scatter: Mutex<Slot>,
    reduce: Mutex<Vec<Slot>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn abandoned(operation: &'static str) -> BenchError {
    BenchError::collective(operation, "the group was abandoned by another rank")
}

/// A reusable barrier that can be opened for good by any one rank.
struct Gate {
    size: usize,
    state: Mutex<GateState>,
    released: Condvar,
}

#[derive(Default)]
struct GateState {
    waiting: usize,
    generation: u64,
    abandoned: bool,
}

impl Gate {
    fn new(size: usize) -> Self {
        Gate {
            size,
            state: Mutex::new(GateState::default()),
            released: Condvar::new(),
        }
    }

    /// Returns `false` if the group was abandoned before every rank arrived.
    fn wait(&self) -> bool {
        let mut state = lock(&self.state);
        if state.abandoned {
            return false;
        }
        state.waiting += 1;
        if state.waiting == self.size {
            state.waiting = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return true;
        }
        let generation = state.generation;
        while state.generation == generation && !state.abandoned {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.generation != generation
    }

    fn abandon(&self) {
        lock(&self.state).abandoned = true;
        self.released.notify_all();
    }
}

/// Launcher for in-process groups.
///
/// # Examples
///
/// ```
/// use sumbench::group::{LocalGroup, ProcessGroup};
///
/// let ranks = LocalGroup::run(4, |comm| comm.rank()).unwrap();
/// assert_eq!(ranks, [0, 1, 2, 3]);
/// ```
pub struct LocalGroup;

impl LocalGroup {
    /// Run `f` once per rank, each on its own thread, and collect the results in rank order.
    ///
    /// All threads are joined before this returns. A rank that panics abandons the group, so the
    /// collectives of the other ranks fail instead of waiting for it, and `run` reports the panic.
    /// A rank that stops early for any other reason must call `abandon()` itself.
    pub fn run<R, F>(size: usize, f: F) -> Result<Vec<R>>
    where
        F: Fn(&LocalCommunicator<'_>) -> R + Sync,
        R: Send,
    {
        if size == 0 {
            return Err(ConfigError::NonPositive {
                var: "process count",
                value: 0,
            }
            .into());
        }
        debug!("starting local group of {} ranks", size);

        let shared = Shared {
            gate: Gate::new(size),
            scatter: Mutex::new(None),
            reduce: Mutex::new((0..size).map(|_| None).collect()),
        };

        thread::scope(|scope| {
            let handles: Vec<_> = (0..size)
                .map(|rank| {
                    let shared = &shared;
                    let f = &f;
                    scope.spawn(move || {
                        let comm = LocalCommunicator { rank, size, shared };
                        panic::catch_unwind(AssertUnwindSafe(|| f(&comm))).map_err(|_| {
                            warn!("rank {} panicked, abandoning the group", rank);
                            comm.abandon();
                            panicked(rank)
                        })
                    })
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| handle.join().unwrap_or_else(|_| Err(panicked(rank))))
                .collect()
        })
    }
}

fn panicked(rank: usize) -> BenchError {
    BenchError::collective("run", format!("rank {} panicked", rank))
}

/// The view of a `LocalGroup` held by one rank
pub struct LocalCommunicator<'a> {
    rank: usize,
    size: usize,
    shared: &'a Shared,
}

impl<'a> ProcessGroup for LocalCommunicator<'a> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        // an abandoned group fails at the next scatter or reduce
        self.shared.gate.wait();
    }

    fn abandon(&self) {
        self.shared.gate.abandon();
    }

    fn time(&self) -> f64 {
        timing::wall_time()
    }

    fn scatter_from_root<T: Sample>(&self, send: Option<&[T]>, recv: &mut [T]) -> Result<()> {
        let chunk = recv.len();
        let expected = chunk * self.size;

        // every rank passes both barriers, even when something is wrong
        let staged = if self.is_root() {
            match send {
                Some(send) if send.len() == expected => {
                    *lock(&self.shared.scatter) = Some(Box::new(send.to_vec()));
                    Ok(())
                }
                Some(send) => Err(BenchError::collective(
                    "scatter",
                    format!(
                        "root buffer holds {} elements, expected {}",
                        send.len(),
                        expected
                    ),
                )),
                None => Err(BenchError::collective("scatter", "root has no send buffer")),
            }
        } else {
            Ok(())
        };
        if !self.shared.gate.wait() {
            return Err(abandoned("scatter"));
        }

        let received = {
            let slot = lock(&self.shared.scatter);
            let start = self.rank * chunk;
            match slot
                .as_ref()
                .and_then(|data| data.downcast_ref::<Vec<T>>())
                .and_then(|data| data.get(start..start + chunk))
            {
                Some(part) => {
                    recv.copy_from_slice(part);
                    Ok(())
                }
                None => Err(BenchError::collective(
                    "scatter",
                    format!("no data for rank {}", self.rank),
                )),
            }
        };
        let completed = self.shared.gate.wait();

        if self.is_root() {
            *lock(&self.shared.scatter) = None;
        }
        if !completed {
            return Err(abandoned("scatter"));
        }
        staged.and(received)
    }

    fn reduce_sum_to_root<S: Summand>(&self, local: S) -> Result<Option<S>> {
        lock(&self.shared.reduce)[self.rank] = Some(Box::new(local));
        if !self.shared.gate.wait() {
            return Err(abandoned("reduce"));
        }

        let total = if self.is_root() {
            let mut slots = lock(&self.shared.reduce);
            let mut total = S::zero();
            let mut failed = None;
            for (rank, slot) in slots.iter_mut().enumerate() {
                match slot.take().map(|value| value.downcast::<S>()) {
                    Some(Ok(value)) => total = total + *value,
                    _ => failed = Some(rank),
                }
            }
            match failed {
                None => Ok(Some(total)),
                Some(rank) => Err(BenchError::collective(
                    "reduce",
                    format!("no contribution from rank {}", rank),
                )),
            }
        } else {
            Ok(None)
        };
        if !self.shared.gate.wait() {
            return Err(abandoned("reduce"));
        }

        total
    }
}
