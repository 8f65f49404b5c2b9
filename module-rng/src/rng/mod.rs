//! Deterministic random number generation
//!
//! A transaction timestamp is folded by a PCG step into the seed of a
//! xoroshiro128+ generator, whose words feed the uniform samplers.
//! CRITICAL: every output must be bit-identical to the reference
//! implementation for the same seed. Reducers replay on other hosts.

mod distribution;
mod pcg;
mod random;
mod xoroshiro;

pub use distribution::{
    bounded, fill, uniform_bigint, uniform_f64, uniform_int, FillElement, WideInt, WordSource,
};
pub use pcg::{expand_seed, PCG_INCREMENT, PCG_MULTIPLIER};
pub use random::{Random, Randomness};
pub use xoroshiro::Xoroshiro128Plus;
