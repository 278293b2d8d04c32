//! Summation strategies
//!
//! - `Sequential`: one thread, left-to-right accumulation. Also produces the reference sum every
//! other strategy is checked against.
//! - `SharedMemory`: fork-join over a dedicated thread pool, one partial sum per worker.
//! - `Distributed`: scatter over a `ProcessGroup`, local sums, sum-reduce to the root.

use crate::error::Result;
use crate::sample::Sample;

pub mod distributed;
pub mod sequential;
pub mod shared;

pub use self::distributed::Distributed;
pub use self::sequential::{sequential_sum, Sequential};
pub use self::shared::SharedMemory;

/// A way of summing an in-memory array
pub trait Summation<T: Sample> {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Sum all elements of `data`.
    fn sum(&self, data: &[T]) -> Result<T::Sum>;
}
