//! Benchmark configuration
//!
//! A `BenchConfig` is built and validated once at startup. The binaries read it from the
//! environment:
//!
//! | variable      | used by           | meaning                                   |
//! |---------------|-------------------|-------------------------------------------|
//! | `SIZE`        | `shared_sum`      | array size, required, in `[1e5, 1e7]`     |
//! | `NUM_THREADS` | `shared_sum`      | worker threads, required, `>= 1`          |
//! | `ARRAY_SIZE`  | `distributed_sum` | array size, optional, default `1e8`       |
//! | `SEED`        | all               | base seed, optional, entropy if unset     |
//!
//! The `*_from_lookup` constructors take the variable lookup as a closure so the parsing rules can
//! be exercised without touching the process environment.

use std::env;
use std::ops::RangeInclusive;

use conv::ConvUtil;

use crate::error::ConfigError;

/// Measured passes per run
pub const DEFAULT_ITERATIONS: usize = 100;
/// Array size of the sequential baseline
pub const SEQUENTIAL_ARRAY_SIZE: usize = 10_000_000;
/// Accepted values of `SIZE`
pub const SHARED_SIZE_RANGE: RangeInclusive<usize> = 100_000..=10_000_000;
/// Array size of the distributed run when `ARRAY_SIZE` is not usable
pub const DEFAULT_DISTRIBUTED_SIZE: usize = 100_000_000;

/// Validated parameters of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of elements in the input array, `>= 1`
    pub array_size: usize,
    /// Worker threads or processes, `>= 1`
    pub worker_count: usize,
    /// Measured passes, `>= 1`
    pub iteration_count: usize,
    /// Base seed for input generation, drawn from entropy if `None`
    pub seed: Option<u64>,
}

impl BenchConfig {
    /// Validate an explicit configuration.
    pub fn new(
        array_size: usize,
        worker_count: usize,
        iteration_count: usize,
    ) -> Result<Self, ConfigError> {
        positive("array size", array_size)?;
        positive("worker count", worker_count)?;
        positive("iteration count", iteration_count)?;
        Ok(BenchConfig {
            array_size,
            worker_count,
            iteration_count,
            seed: None,
        })
    }

    /// Use a fixed base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or a fresh one from entropy.
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// The single-threaded baseline: `SEQUENTIAL_ARRAY_SIZE` elements, one worker.
    pub fn sequential() -> Self {
        BenchConfig {
            array_size: SEQUENTIAL_ARRAY_SIZE,
            worker_count: 1,
            iteration_count: DEFAULT_ITERATIONS,
            seed: None,
        }
    }

    /// Read `SEED` from the environment for the sequential baseline.
    pub fn sequential_from_env() -> Result<Self, ConfigError> {
        Self::sequential_from_lookup(|var| env::var(var).ok())
    }

    /// See `sequential_from_env()`.
    pub fn sequential_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::sequential();
        config.seed = seed(&lookup)?;
        Ok(config)
    }

    /// Read `SIZE`, `NUM_THREADS` and `SEED` from the environment.
    pub fn shared_from_env() -> Result<Self, ConfigError> {
        Self::shared_from_lookup(|var| env::var(var).ok())
    }

    /// See `shared_from_env()`.
    pub fn shared_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let size = required(&lookup, "SIZE")?;
        if size < 0 || !SHARED_SIZE_RANGE.contains(&to_usize("SIZE", size)?) {
            return Err(ConfigError::OutOfRange {
                var: "SIZE",
                value: size,
                min: *SHARED_SIZE_RANGE.start(),
                max: *SHARED_SIZE_RANGE.end(),
            });
        }

        let threads = required(&lookup, "NUM_THREADS")?;
        if threads <= 0 {
            return Err(ConfigError::NonPositive {
                var: "NUM_THREADS",
                value: threads,
            });
        }

        let mut config = Self::new(
            to_usize("SIZE", size)?,
            to_usize("NUM_THREADS", threads)?,
            DEFAULT_ITERATIONS,
        )?;
        config.seed = seed(&lookup)?;
        Ok(config)
    }

    /// Read `ARRAY_SIZE` and `SEED` from the environment for a group of `processes` ranks.
    pub fn distributed_from_env(processes: usize) -> Result<Self, ConfigError> {
        Self::distributed_from_lookup(processes, |var| env::var(var).ok())
    }

    /// See `distributed_from_env()`.
    ///
    /// An `ARRAY_SIZE` that is absent, unparsable or not positive falls back to
    /// `DEFAULT_DISTRIBUTED_SIZE`.
    pub fn distributed_from_lookup<F>(processes: usize, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let array_size = lookup("ARRAY_SIZE")
            .and_then(|text| text.trim().parse::<i64>().ok())
            .filter(|&size| size > 0)
            .and_then(|size| size.value_as::<usize>().ok())
            .unwrap_or(DEFAULT_DISTRIBUTED_SIZE);

        let mut config = Self::new(array_size, processes, DEFAULT_ITERATIONS)?;
        config.seed = seed(&lookup)?;
        Ok(config)
    }
}

fn positive(var: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::NonPositive { var, value: 0 })
    } else {
        Ok(())
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let text = lookup(var).ok_or(ConfigError::Missing { var })?;
    text.trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber { var, value: text })
}

fn to_usize(var: &'static str, value: i64) -> Result<usize, ConfigError> {
    value
        .value_as::<usize>()
        .map_err(|_| ConfigError::NonPositive { var, value })
}

fn seed<F>(lookup: &F) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("SEED") {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber {
                var: "SEED",
                value: text,
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn shared_accepts_valid_environment() {
        let config =
            BenchConfig::shared_from_lookup(vars(&[("SIZE", "100000"), ("NUM_THREADS", "4")]))
                .unwrap();
        assert_eq!(config.array_size, 100_000);
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.iteration_count, DEFAULT_ITERATIONS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn shared_rejects_bad_thread_counts() {
        for threads in ["0", "-3"] {
            let err = BenchConfig::shared_from_lookup(vars(&[
                ("SIZE", "200000"),
                ("NUM_THREADS", threads),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::NonPositive { var: "NUM_THREADS", .. }));
        }

        let err = BenchConfig::shared_from_lookup(vars(&[("SIZE", "200000")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: "NUM_THREADS" });

        let err = BenchConfig::shared_from_lookup(vars(&[
            ("SIZE", "200000"),
            ("NUM_THREADS", "four"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { var: "NUM_THREADS", .. }));
    }

    #[test]
    fn shared_rejects_sizes_out_of_range() {
        for size in ["99999", "10000001", "-1", "0"] {
            let err =
                BenchConfig::shared_from_lookup(vars(&[("SIZE", size), ("NUM_THREADS", "2")]))
                    .unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { var: "SIZE", .. }), "{}", size);
        }
        let err = BenchConfig::shared_from_lookup(vars(&[("NUM_THREADS", "2")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: "SIZE" });
    }

    #[test]
    fn distributed_falls_back_to_default_size() {
        for env in [vec![], vec![("ARRAY_SIZE", "0")], vec![("ARRAY_SIZE", "-5")], vec![("ARRAY_SIZE", "lots")]] {
            let config = BenchConfig::distributed_from_lookup(4, vars(&env)).unwrap();
            assert_eq!(config.array_size, DEFAULT_DISTRIBUTED_SIZE);
            assert_eq!(config.worker_count, 4);
        }
        let config =
            BenchConfig::distributed_from_lookup(16, vars(&[("ARRAY_SIZE", "1000")])).unwrap();
        assert_eq!(config.array_size, 1000);
    }

    #[test]
    fn seed_is_parsed_when_present() {
        let config = BenchConfig::sequential_from_lookup(vars(&[("SEED", "17")])).unwrap();
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.array_size, SEQUENTIAL_ARRAY_SIZE);

        let err = BenchConfig::sequential_from_lookup(vars(&[("SEED", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { var: "SEED", .. }));
    }

    #[test]
    fn explicit_config_must_be_positive() {
        assert!(BenchConfig::new(0, 1, 1).is_err());
        assert!(BenchConfig::new(1, 0, 1).is_err());
        assert!(BenchConfig::new(1, 1, 0).is_err());
        assert_eq!(BenchConfig::new(5, 2, 3).unwrap().with_seed(1).seed, Some(1));
    }
}
