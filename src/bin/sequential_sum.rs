//! Single-threaded baseline: sums 10 000 000 random `f32` values 100 times.
//!
//! ```text
//! cargo run --release --bin sequential_sum
//! ```

use std::process;

use sumbench::BenchError;
use sumbench::config::BenchConfig;
use sumbench::harness;
use sumbench::random::ChaChaSource;

fn main() {
    env_logger::init();

    let result = BenchConfig::sequential_from_env()
        .map_err(BenchError::from)
        .and_then(|config| {
            let mut source = ChaChaSource::from_config(&config);
            harness::run_sequential::<f32, _>(&config, &mut source)
        });

    match result {
        Ok(report) => print!("{}", report),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
