//! Shared-memory benchmark: sums `SIZE` random `f64` values on `NUM_THREADS` threads.
//!
//! ```text
//! SIZE=10000000 NUM_THREADS=8 cargo run --release --bin shared_sum
//! ```

use std::process;

use sumbench::BenchError;
use sumbench::config::BenchConfig;
use sumbench::harness;
use sumbench::random::ChaChaSource;
use sumbench::strategy::SharedMemory;

fn main() {
    env_logger::init();

    let result = BenchConfig::shared_from_env()
        .map_err(BenchError::from)
        .and_then(|config| {
            let pool = SharedMemory::new(config.worker_count)?;
            let mut source = ChaChaSource::from_config(&config);
            harness::run_shared::<f64, _>(&config, &pool, &mut source)
        });

    match result {
        Ok(report) => print!("{}", report),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
