//! Distributed benchmark: scatters `ARRAY_SIZE` random `i32` values over the MPI world and
//! reduces the partial sums on rank 0.
//!
//! ```text
//! cargo build --release --features mpi --bin distributed_sum
//! ARRAY_SIZE=100000000 mpiexec -n 4 target/release/distributed_sum
//! ```

use std::process;

use sumbench::BenchError;
use sumbench::config::BenchConfig;
use sumbench::group::{MpiGroup, ProcessGroup};
use sumbench::harness;
use sumbench::random::ChaChaSource;

fn main() {
    env_logger::init();

    let group = match MpiGroup::initialize() {
        Ok(group) => group,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    let result = BenchConfig::distributed_from_env(group.size())
        .map_err(BenchError::from)
        .and_then(|config| {
            let mut source = ChaChaSource::from_config(&config);
            harness::run_distributed::<_, i32, _>(&group, &config, &mut source)
        });

    match result {
        Ok(Some(report)) => print!("{}", report),
        Ok(None) => {}
        Err(err) => {
            eprintln!("Error (rank {}): {}", group.rank(), err);
            group.abort(1);
        }
    }
}
