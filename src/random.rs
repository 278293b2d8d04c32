//! Filling input arrays
//!
//! Input data comes from a `RandomSource`. The default source is a ChaCha8 stream which is
//! reproducible for a given seed; `ReplaySource` cycles through a fixed list of values so tests
//! can decide exactly what gets summed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::sample::Sample;

/// Something that can (re)fill an input array.
pub trait RandomSource<T> {
    /// Restart the stream from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Overwrite every element of `out` with the next values of the stream.
    fn fill(&mut self, out: &mut [T]);
}

/// Uniform samples from a ChaCha8 generator
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    /// A source whose stream is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        ChaChaSource {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        ChaChaSource {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded from `config.seed` if set, from entropy otherwise.
    pub fn from_config(config: &BenchConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<T: Sample> RandomSource<T> for ChaChaSource {
    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn fill(&mut self, out: &mut [T]) {
        for x in out.iter_mut() {
            *x = T::draw(&mut self.rng);
        }
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// `reseed(s)` moves the cursor to `s % len`, so different seeds still yield different (but
/// predictable) arrays.
#[derive(Debug, Clone)]
pub struct ReplaySource<T> {
    values: Vec<T>,
    cursor: usize,
}

impl<T: Copy> ReplaySource<T> {
    /// Replay `values`.
    ///
    /// # Panics
    ///
    /// If `values` is empty.
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "ReplaySource needs at least one value");
        ReplaySource { values, cursor: 0 }
    }
}

impl<T: Copy> RandomSource<T> for ReplaySource<T> {
    fn reseed(&mut self, seed: u64) {
        let len = self.values.len() as u64;
        self.cursor = (seed % len) as usize;
    }

    fn fill(&mut self, out: &mut [T]) {
        for x in out.iter_mut() {
            *x = self.values[self.cursor];
            self.cursor = (self.cursor + 1) % self.values.len();
        }
    }
}

/// Allocate an input array of `size` elements and fill it from `source`.
pub fn generate_array<T, S>(size: usize, source: &mut S) -> Result<Vec<T>>
where
    T: Sample,
    S: RandomSource<T> + ?Sized,
{
    padded_array(size, size, source)
}

/// Allocate `padded_len` elements, fill the first `size` from `source` and leave the tail zero.
///
/// Used for the root buffer of a scatter, which must hold an equal chunk for every rank.
pub fn padded_array<T, S>(size: usize, padded_len: usize, source: &mut S) -> Result<Vec<T>>
where
    T: Sample,
    S: RandomSource<T> + ?Sized,
{
    let mut array = zeroed(padded_len.max(size))?;
    source.fill(&mut array[..size]);
    Ok(array)
}

/// Allocate `len` zeroed elements, reporting allocation failure instead of aborting.
pub(crate) fn zeroed<T: Sample>(len: usize) -> Result<Vec<T>> {
    let mut array = Vec::new();
    array
        .try_reserve_exact(len)
        .map_err(|source| BenchError::Allocation {
            elements: len,
            source,
        })?;
    array.resize(len, T::default());
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_array() {
        let a: Vec<f32> = generate_array(1000, &mut ChaChaSource::from_seed(42)).unwrap();
        let b: Vec<f32> = generate_array(1000, &mut ChaChaSource::from_seed(42)).unwrap();
        let c: Vec<f32> = generate_array(1000, &mut ChaChaSource::from_seed(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut source = ChaChaSource::from_seed(1);
        let mut first = vec![0i32; 64];
        let mut second = vec![0i32; 64];
        RandomSource::<i32>::reseed(&mut source, 9);
        source.fill(&mut first[..]);
        RandomSource::<i32>::reseed(&mut source, 9);
        source.fill(&mut second[..]);
        assert_eq!(first, second);
    }

    #[test]
    fn replay_wraps_and_reseeds() {
        let mut source = ReplaySource::new(vec![1, 2, 3]);
        let a: Vec<i32> = generate_array(5, &mut source).unwrap();
        assert_eq!(a, [1, 2, 3, 1, 2]);

        source.reseed(4);
        let b: Vec<i32> = generate_array(4, &mut source).unwrap();
        assert_eq!(b, [2, 3, 1, 2]);
    }

    #[test]
    fn padding_is_zero() {
        let mut source = ReplaySource::new(vec![7]);
        let a: Vec<i32> = padded_array(5, 8, &mut source).unwrap();
        assert_eq!(a, [7, 7, 7, 7, 7, 0, 0, 0]);
    }

    #[test]
    fn absurd_allocation_is_reported() {
        let mut source = ReplaySource::new(vec![1.0f64]);
        let err = generate_array::<f64, _>(usize::MAX / 2, &mut source).unwrap_err();
        assert!(matches!(err, BenchError::Allocation { .. }));
    }
}
