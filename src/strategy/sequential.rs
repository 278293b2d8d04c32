//! Single-threaded summation

use super::Summation;
use crate::error::Result;
use crate::sample::{Sample, Summand};

/// Sum `data` from left to right in the accumulator type of `T`.
///
/// # Examples
///
/// ```
/// use sumbench::strategy::sequential_sum;
///
/// assert_eq!(sequential_sum(&[1i32, 2, 3, 4, 5]), 15i64);
/// ```
pub fn sequential_sum<T: Sample>(data: &[T]) -> T::Sum {
    data.iter().fold(T::Sum::zero(), |acc, &x| acc + x.widen())
}

/// The single-threaded baseline
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl<T: Sample> Summation<T> for Sequential {
    fn name(&self) -> &str {
        "sequential"
    }

    fn sum(&self, data: &[T]) -> Result<T::Sum> {
        Ok(sequential_sum(data))
    }
}
