//! Randomness handle exposed to module code
//!
//! One [`Random`] exists per reducer or procedure invocation. It is built from
//! the invocation's seed alone and never reused: sharing a handle between
//! invocations would make later draws depend on unrelated earlier calls.

use crate::core::{Seed, Timestamp};
use crate::models::{Range, RangeError};
use crate::rng::distribution::{self, FillElement, WideInt};
use crate::rng::xoroshiro::Xoroshiro128Plus;

/// Randomness capabilities available to module code
pub trait Randomness {
    /// Uniform double in `[0, 1)` with 53 bits of precision
    fn next_f64(&mut self) -> f64;

    /// Fill a buffer with uniform draws over each element's full width
    fn fill<'a, T: FillElement>(&mut self, buffer: &'a mut [T]) -> &'a mut [T];

    /// Raw 32-bit word from the generator
    fn uint32(&mut self) -> u32;

    /// Uniform integer in `[min, max]`
    ///
    /// # Errors
    /// [`RangeError::Reversed`] if `min > max`. No randomness is consumed.
    fn integer_in_range(&mut self, min: i64, max: i64) -> Result<i64, RangeError>;

    /// Uniform wide integer in `[min, max]`
    ///
    /// # Errors
    /// [`RangeError::Reversed`] if `min > max`. No randomness is consumed.
    fn bigint_in_range<T: WideInt>(&mut self, min: T, max: T) -> Result<T, RangeError>;
}

/// Deterministic randomness for one invocation
///
/// # Example
/// ```
/// use module_rng::{Random, Randomness, Timestamp};
///
/// let mut random = Random::from_timestamp(Timestamp::from_micros_since_unix_epoch(1_700_000_000_000_000));
/// let roll = random.integer_in_range(1, 6).unwrap();
/// assert_eq!(roll, 4);
///
/// let probability = random.next_f64();
/// assert!((0.0..1.0).contains(&probability));
/// ```
#[derive(Debug)]
pub struct Random {
    rng: Xoroshiro128Plus,
}

impl Random {
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: Xoroshiro128Plus::from_seed(seed),
        }
    }

    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self::new(timestamp.seed())
    }

    /// Uniform integer from a pre-validated range
    pub fn sample_int(&mut self, range: Range<i64>) -> i64 {
        distribution::uniform_int(&mut self.rng, range)
    }

    /// Uniform wide integer from a pre-validated range
    pub fn sample_bigint<T: WideInt>(&mut self, range: Range<T>) -> T {
        distribution::uniform_bigint(&mut self.rng, range)
    }
}

impl Randomness for Random {
    fn next_f64(&mut self) -> f64 {
        distribution::uniform_f64(&mut self.rng)
    }

    fn fill<'a, T: FillElement>(&mut self, buffer: &'a mut [T]) -> &'a mut [T] {
        distribution::fill(&mut self.rng, buffer)
    }

    fn uint32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn integer_in_range(&mut self, min: i64, max: i64) -> Result<i64, RangeError> {
        let range = Range::new(min, max)?;
        Ok(self.sample_int(range))
    }

    fn bigint_in_range<T: WideInt>(&mut self, min: T, max: T) -> Result<T, RangeError> {
        let range = Range::new(min, max)?;
        Ok(self.sample_bigint(range))
    }
}

#[cfg(feature = "rand")]
impl rand_core::RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::RngCore::fill_bytes(&mut self.rng, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        rand_core::RngCore::try_fill_bytes(&mut self.rng, dest)
    }
}
