//! Uniform sampling over the generator's word stream
//!
//! Every sampler here consumes 32-bit words and reproduces the reference
//! uniform distributions draw for draw, including how many words a rejected
//! candidate burns.
//!
//! # Bias avoidance
//!
//! A word `w` is first shifted to `delta = w ^ 0x8000_0000` (the reference
//! generator emits signed words and offsets them into `[0, 2^32)`).
//!
//! - Bounded draw of `n <= 2^32` values: reject `delta` at or above the largest
//!   multiple of `n` that fits in `2^32`, then reduce modulo `n`.
//! - [`uniform_int`] beyond 32 bits: split `max - min + 1` into big-endian
//!   32-bit limbs, draw each limb with a bounded draw (the first bounded by its
//!   own limb, the rest full width) and reject candidates that are not
//!   lexicographically below the limbs.
//! - [`uniform_bigint`]: concatenate `k` deltas into one candidate, with `k`
//!   just large enough to cover the range, reject at or above the largest
//!   multiple of the range size below `2^(32k)`, then reduce.
//!
//! None of these consume a word count that depends on anything other than the
//! generator state and the requested range.

use crate::models::Range;
use crate::rng::xoroshiro::Xoroshiro128Plus;
use std::fmt::Display;
use tracing::trace;

/// Number of distinct 32-bit words
const WORD_VALUES: u64 = 1 << 32;

/// Offset applied to every raw word before it is used
const SIGN_BIT: u32 = 0x8000_0000;

/// Widest limb decomposition [`uniform_int`] can need (`2^64` is three limbs)
const MAX_LIMBS: usize = 4;

const FLOAT_HIGH_BITS: u32 = 26;
const FLOAT_LOW_BITS: u32 = 27;

/// Source of 32-bit words for the samplers
pub trait WordSource {
    fn next_word(&mut self) -> u32;
}

impl WordSource for Xoroshiro128Plus {
    fn next_word(&mut self) -> u32 {
        self.next_u32()
    }
}

fn next_delta<R: WordSource + ?Sized>(rng: &mut R) -> u32 {
    rng.next_word() ^ SIGN_BIT
}

/// Uniform draw from `[0, range_size)` for `range_size` in `1..=2^32`
///
/// Always consumes at least one word, even when `range_size == 1`.
pub fn bounded<R: WordSource + ?Sized>(rng: &mut R, range_size: u64) -> u32 {
    debug_assert!((1..=WORD_VALUES).contains(&range_size));

    let max_allowed = if range_size > 2 {
        (WORD_VALUES / range_size) * range_size
    } else {
        WORD_VALUES
    };

    loop {
        let delta = u64::from(next_delta(rng));
        if delta < max_allowed {
            return (delta % range_size) as u32;
        }
        trace!(delta, range_size, "rejected bounded candidate");
    }
}

/// Uniform draw from `[0, size)` for `size` above `2^32`, limb by limb
fn bounded_limbs<R: WordSource + ?Sized>(rng: &mut R, size: u128) -> u128 {
    debug_assert!(size > u128::from(WORD_VALUES));
    debug_assert!(size <= 1 << 96);

    let all = [
        (size >> 96) as u32,
        (size >> 64) as u32,
        (size >> 32) as u32,
        size as u32,
    ];
    let start = all.iter().position(|&limb| limb != 0).unwrap_or(0);
    let limbs = &all[start..];

    let mut out = [0u32; MAX_LIMBS];
    loop {
        let candidate = &mut out[..limbs.len()];
        for (index, slot) in candidate.iter_mut().enumerate() {
            let limb_size = if index == 0 {
                u64::from(limbs[0]) + 1
            } else {
                WORD_VALUES
            };
            *slot = bounded(rng, limb_size);
        }

        if *candidate < *limbs {
            return candidate
                .iter()
                .fold(0u128, |acc, &limb| (acc << 32) | u128::from(limb));
        }
        trace!(?candidate, "rejected limb candidate");
    }
}

/// Uniform integer in the closed range
///
/// # Example
/// ```
/// use module_rng::rng::{uniform_int, Xoroshiro128Plus};
/// use module_rng::{Range, Seed};
///
/// let mut rng = Xoroshiro128Plus::from_seed(Seed::new(1_700_000_000_000_000));
/// let roll = uniform_int(&mut rng, Range::new(1, 6).unwrap());
/// assert_eq!(roll, 4);
/// ```
pub fn uniform_int<R: WordSource + ?Sized>(rng: &mut R, range: Range<i64>) -> i64 {
    let span = range.max().abs_diff(range.min());
    let offset = if span <= u64::from(u32::MAX) {
        u64::from(bounded(rng, span + 1))
    } else {
        bounded_limbs(rng, u128::from(span) + 1) as u64
    };
    range.min().wrapping_add_unsigned(offset)
}

/// Integer types the wide-integer sampler accepts
///
/// Offsets are computed in `u128`, which covers the span of every implementor.
pub trait WideInt: Copy + PartialOrd + Display {
    /// `max - min` as an unsigned distance (`max >= min`)
    fn span(min: Self, max: Self) -> u128;

    /// `min + offset`, where the result is known to be in range
    fn offset(min: Self, offset: u128) -> Self;
}

macro_rules! impl_wide_int {
    ($($ty:ty => $unsigned:ty),*) => {
        $(
            impl WideInt for $ty {
                fn span(min: Self, max: Self) -> u128 {
                    max.wrapping_sub(min) as $unsigned as u128
                }

                fn offset(min: Self, offset: u128) -> Self {
                    min.wrapping_add(offset as $unsigned as $ty)
                }
            }
        )*
    };
}

impl_wide_int!(
    i8 => u8, u8 => u8, i16 => u16, u16 => u16, i32 => u32, u32 => u32,
    i64 => u64, u64 => u64, i128 => u128, u128 => u128
);

/// Uniform wide integer in the closed range
///
/// # Example
/// ```
/// use module_rng::rng::{uniform_bigint, Xoroshiro128Plus};
/// use module_rng::{Range, Seed};
///
/// let mut rng = Xoroshiro128Plus::from_seed(Seed::new(42));
/// let big = uniform_bigint(&mut rng, Range::new(0u128, u64::MAX as u128).unwrap());
/// assert_eq!(big, 18_131_931_510_856_473_923);
/// ```
pub fn uniform_bigint<T: WideInt, R: WordSource + ?Sized>(rng: &mut R, range: Range<T>) -> T {
    let span = T::span(range.min(), range.max());

    // A range of all 2^128 values accepts every four-word candidate.
    if span == u128::MAX {
        return T::offset(range.min(), concat_deltas(rng, 4));
    }

    let significant_bits = u128::BITS - span.leading_zeros();
    let words = significant_bits.div_ceil(32).max(1);
    let all_ones = if words == 4 {
        u128::MAX
    } else {
        (1u128 << (32 * words)) - 1
    };

    let range_size = span + 1;
    // 2^(32k) mod range_size, without forming 2^(32k)
    let remainder = (all_ones % range_size + 1) % range_size;
    let threshold = all_ones - remainder;

    loop {
        let candidate = concat_deltas(rng, words);
        if candidate <= threshold {
            return T::offset(range.min(), candidate % range_size);
        }
        trace!(words, "rejected wide candidate");
    }
}

fn concat_deltas<R: WordSource + ?Sized>(rng: &mut R, words: u32) -> u128 {
    (0..words).fold(0u128, |acc, _| (acc << 32) | u128::from(next_delta(rng)))
}

/// Uniform double in `[0, 1)` with 53 bits of precision
///
/// Draws a 26-bit high part, then a 27-bit low part.
pub fn uniform_f64<R: WordSource + ?Sized>(rng: &mut R) -> f64 {
    let high = bounded(rng, 1 << FLOAT_HIGH_BITS);
    let low = bounded(rng, 1 << FLOAT_LOW_BITS);
    let mantissa = (u64::from(high) << FLOAT_LOW_BITS) | u64::from(low);
    mantissa as f64 * (1.0 / (1u64 << (FLOAT_HIGH_BITS + FLOAT_LOW_BITS)) as f64)
}

mod sealed {
    pub trait Sealed {}
}

/// Buffer element types accepted by [`fill`]
///
/// Elements up to four bytes wide use a single bounded draw; eight and
/// sixteen byte elements go through [`uniform_bigint`].
pub trait FillElement: Copy + sealed::Sealed {
    const BYTES: usize;

    fn draw<R: WordSource + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_fill_narrow {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FillElement for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();

                fn draw<R: WordSource + ?Sized>(rng: &mut R) -> Self {
                    bounded(rng, 1u64 << (8 * Self::BYTES)) as $ty
                }
            }
        )*
    };
}

macro_rules! impl_fill_wide {
    ($($ty:ty => $unsigned:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FillElement for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();

                fn draw<R: WordSource + ?Sized>(rng: &mut R) -> Self {
                    let full = Range::new_unchecked(0, <$unsigned>::MAX);
                    uniform_bigint(rng, full) as $ty
                }
            }
        )*
    };
}

impl_fill_narrow!(i8, u8, i16, u16, i32, u32);
impl_fill_wide!(i64 => u64, u64 => u64, i128 => u128, u128 => u128);

/// Overwrite every element with an independent uniform draw over the
/// element's full bit width
///
/// Returns the same buffer. Empty buffers consume no words.
///
/// # Example
/// ```
/// use module_rng::rng::{fill, Xoroshiro128Plus};
/// use module_rng::Seed;
///
/// let mut rng = Xoroshiro128Plus::from_seed(Seed::new(7));
/// let mut buf = [0u16; 4];
/// assert_eq!(fill(&mut rng, &mut buf), &[3272, 6690, 37569, 16894]);
/// ```
pub fn fill<'a, T: FillElement, R: WordSource + ?Sized>(rng: &mut R, buffer: &'a mut [T]) -> &'a mut [T] {
    for element in buffer.iter_mut() {
        *element = T::draw(rng);
    }
    buffer
}
