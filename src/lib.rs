//! Array summation benchmarks
//!
//! Measures how long it takes to sum a large array of numbers, three ways:
//!
//! - **Sequential**: one thread, left-to-right accumulation.
//! - **Shared memory**: the array is split across a fixed number of worker threads, each computes
//!   a partial sum, and the partial sums are combined.
//! - **Distributed**: the root of a process group scatters equal chunks of the array to every
//!   rank, each rank sums its chunk, and the partial sums are reduced back to the root.
//!
//! Every parallel result is checked against a sequential reference sum. Timings are averaged over
//! a fixed number of measured passes that follow one unmeasured warm-up pass.
//!
//! # Usage
//!
//! The binaries `sequential_sum`, `shared_sum` and `distributed_sum` (feature `mpi`) are
//! configured through the environment, see the `config` module. The same drivers are available
//! as library functions:
//!
//! ```no_run
//! use sumbench::config::BenchConfig;
//! use sumbench::harness;
//! use sumbench::random::ChaChaSource;
//! use sumbench::strategy::SharedMemory;
//!
//! let config = BenchConfig::new(1_000_000, 4, 10).unwrap().with_seed(7);
//! let pool = SharedMemory::new(config.worker_count).unwrap();
//! let mut source = ChaChaSource::from_config(&config);
//! let report = harness::run_shared::<f64, _>(&config, &pool, &mut source).unwrap();
//! print!("{}", report);
//! ```
//!
//! Distributed runs work on any `ProcessGroup`. `LocalGroup` simulates one on threads:
//!
//! ```
//! use sumbench::config::BenchConfig;
//! use sumbench::group::LocalGroup;
//! use sumbench::harness;
//! use sumbench::random::ChaChaSource;
//!
//! let config = BenchConfig::new(1000, 4, 3).unwrap().with_seed(1);
//! let reports = LocalGroup::run(4, |comm| {
//!     let mut source = ChaChaSource::from_seed(0);
//!     harness::run_distributed::<_, i32, _>(comm, &config, &mut source).unwrap()
//! })
//! .unwrap();
//! assert!(reports[0].is_some());
//! ```
//!
//! # Features
//!
//! - `mpi`: adds `group::MpiGroup` and the `distributed_sum` binary. Requires an MPI
//!   installation.

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod group;
pub mod harness;
pub mod partition;
pub mod random;
pub mod report;
pub mod sample;
pub mod strategy;
pub mod timing;

/// Public traits
pub mod traits {
    pub use crate::group::ProcessGroup;
    pub use crate::random::RandomSource;
    pub use crate::sample::{Sample, Summand};
    pub use crate::strategy::Summation;
}

pub use crate::config::BenchConfig;
pub use crate::error::{BenchError, ConfigError, Result};
