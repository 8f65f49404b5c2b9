//! Seed expansion
//!
//! Folds a 64-bit seed into the 32-bit seed the core generator takes, using a
//! single step of the PCG-XSH-RR permuted congruential generator. The step
//! decorrelates nearby timestamps before they reach xoroshiro128+.
//!
//! # Determinism
//!
//! The constants and bit operations below are part of the replay contract.
//! Changing any of them changes every random value every module has ever drawn.

use crate::core::Seed;

/// LCG multiplier
pub const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// LCG increment
pub const PCG_INCREMENT: u64 = 11_634_580_027_462_260_723;

/// Expand a 64-bit seed into the 32-bit generator seed
///
/// # Example
/// ```
/// use module_rng::rng::expand_seed;
/// use module_rng::Seed;
///
/// assert_eq!(expand_seed(Seed::new(0)), 4_185_125_612);
/// ```
pub fn expand_seed(seed: Seed) -> u32 {
    let state = seed
        .value()
        .wrapping_mul(PCG_MULTIPLIER)
        .wrapping_add(PCG_INCREMENT);
    let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
    let rot = (state >> 59) as u32;
    xorshifted.rotate_right(rot)
}
