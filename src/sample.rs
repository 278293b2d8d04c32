//! Describing the numbers being summed
//!
//! A benchmark run sums an array of `Sample`s into a `Summand`. The two are not always the same
//! type: integer samples are accumulated in a wider integer so that arrays of the configured sizes
//! cannot overflow, while floating-point samples accumulate in their own precision (plain
//! accumulation, no compensated summation).
//!
//! | `Sample` | drawn from | `Summand` | comparison |
//! |----------|------------|-----------|------------|
//! | `f32`    | `[0, 1)`   | `f32`     | tolerance  |
//! | `f64`    | `[0, 1)`   | `f64`     | tolerance  |
//! | `i32`    | `[0, 100)` | `i64`     | exact      |
//!
//! With the `mpi` feature enabled, both traits additionally require
//! `mpi::traits::Equivalence` so values can be moved by collective operations.

use std::fmt::{Debug, Display};
use std::ops::Add;

use rand::Rng;

/// Absolute tolerance used when comparing floating-point sums
pub const FLOAT_TOLERANCE: f64 = 1e-5;

#[cfg(feature = "mpi")]
mod wire {
    /// Types that can be sent through the collectives of the active process group.
    pub trait Wire: mpi::traits::Equivalence {}
    impl<T: mpi::traits::Equivalence> Wire for T {}
}

#[cfg(not(feature = "mpi"))]
mod wire {
    /// Types that can be sent through the collectives of the active process group.
    pub trait Wire {}
    impl<T> Wire for T {}
}

pub use self::wire::Wire;

/// An accumulator for sums of `Sample`s.
pub trait Summand:
    Copy + Default + Send + Sync + Debug + Display + Add<Output = Self> + Wire + 'static
{
    /// The additive identity
    fn zero() -> Self {
        Self::default()
    }

    /// The tolerance `within_tolerance()` applies, `0.0` for exact comparison
    fn tolerance() -> f64;

    /// Whether `self` agrees with `reference` closely enough to be considered correct.
    fn within_tolerance(self, reference: Self) -> bool;
}

/// An element of an input array.
pub trait Sample: Copy + Default + Send + Sync + Debug + Display + Wire + 'static {
    /// The accumulator type for sums of `Self`
    type Sum: Summand;

    /// Draw one value from the element's uniform distribution.
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Convert into the accumulator type.
    fn widen(self) -> Self::Sum;
}

macro_rules! float_summand {
    ($float:ty) => {
        impl Summand for $float {
            fn tolerance() -> f64 {
                FLOAT_TOLERANCE
            }

            fn within_tolerance(self, reference: Self) -> bool {
                f64::from(self - reference).abs() <= FLOAT_TOLERANCE
            }
        }

        impl Sample for $float {
            type Sum = $float;

            fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen::<$float>()
            }

            fn widen(self) -> Self::Sum {
                self
            }
        }
    };
}

float_summand!(f32);
float_summand!(f64);

macro_rules! integer_summand {
    ($int:ty) => {
        impl Summand for $int {
            fn tolerance() -> f64 {
                0.0
            }

            fn within_tolerance(self, reference: Self) -> bool {
                self == reference
            }
        }
    };
}

integer_summand!(i64);

impl Sample for i32 {
    type Sum = i64;

    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen_range(0..100)
    }

    fn widen(self) -> Self::Sum {
        i64::from(self)
    }
}
