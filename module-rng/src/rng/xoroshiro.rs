//! xoroshiro128+ random number generator
//!
//! A fast two-word generator that is deterministic and suitable for
//! simulation-grade randomness. It is NOT cryptographically secure.
//!
//! # Algorithm
//!
//! xoroshiro128+ (rotation constants 24, 16, 37) keeps 128 bits of state in
//! two 64-bit words. Each step emits the sum of the two words, then mixes them
//! with xor, shift and rotate.
//!
//! # Determinism
//!
//! Same seed → same sequence of words. Seeding mirrors the reference
//! implementation: the 32-bit expanded seed fills the low half of `s0`, its
//! complement fills the high half, and `s1` starts at zero. `s0` is therefore
//! never zero and the all-zero fixed point is unreachable.
//!
//! The generator deliberately does not implement `Clone`: two copies of one
//! stream would let unrelated code observe each other's draws on replay.

use crate::core::Seed;
use crate::rng::pcg::expand_seed;
use tracing::debug;

/// Deterministic random number generator using xoroshiro128+
///
/// # Example
/// ```
/// use module_rng::rng::Xoroshiro128Plus;
/// use module_rng::Seed;
///
/// let mut rng = Xoroshiro128Plus::from_seed(Seed::new(0));
/// assert_eq!(rng.next_u64(), 471_766_440_407_724_780);
/// ```
#[derive(Debug)]
pub struct Xoroshiro128Plus {
    s0: u64,
    s1: u64,
}

impl Xoroshiro128Plus {
    /// Create a generator from a 64-bit seed
    ///
    /// The seed is folded to 32 bits with [`expand_seed`] first.
    pub fn from_seed(seed: Seed) -> Self {
        let expanded = expand_seed(seed);
        debug!(seed = seed.value(), expanded, "seeding xoroshiro128+");
        Self::from_expanded_seed(expanded)
    }

    /// Create a generator directly from a 32-bit expanded seed
    ///
    /// # Example
    /// ```
    /// use module_rng::rng::Xoroshiro128Plus;
    ///
    /// let rng = Xoroshiro128Plus::from_expanded_seed(1);
    /// assert_eq!(rng.state(), (0xFFFF_FFFE_0000_0001, 0));
    /// ```
    pub fn from_expanded_seed(seed: u32) -> Self {
        let s0 = (u64::from(!seed) << 32) | u64::from(seed);
        Self { s0, s1: 0 }
    }

    /// Generate the next 64-bit word
    ///
    /// Advances the internal state.
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.s0;
        let mut s1 = self.s1;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.s1 = s1.rotate_left(37);

        result
    }

    /// Generate the next 32-bit word
    ///
    /// The low half of [`next_u64`](Self::next_u64), which is exactly what
    /// the 32-bit reference generator emits. Consumes one full step.
    pub fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Current state words `(s0, s1)`
    pub fn state(&self) -> (u64, u64) {
        (self.s0, self.s1)
    }
}

#[cfg(feature = "rand")]
impl rand_core::RngCore for Xoroshiro128Plus {
    fn next_u32(&mut self) -> u32 {
        Xoroshiro128Plus::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Xoroshiro128Plus::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_word_is_expanded_seed_in_low_half() {
        // s1 starts at zero, so the first output is s0 itself.
        let mut rng = Xoroshiro128Plus::from_expanded_seed(0xDEAD_BEEF);
        let word = rng.next_u64();
        assert_eq!(word as u32, 0xDEAD_BEEF);
        assert_eq!((word >> 32) as u32, !0xDEAD_BEEF);
    }

    #[test]
    fn test_zero_expanded_seed_has_nonzero_state() {
        let rng = Xoroshiro128Plus::from_expanded_seed(0);
        assert_ne!(rng.state(), (0, 0));
    }

    #[test]
    fn test_next_u32_truncates_next_u64() {
        let mut wide = Xoroshiro128Plus::from_seed(Seed::new(99999));
        let mut narrow = Xoroshiro128Plus::from_seed(Seed::new(99999));
        for _ in 0..100 {
            assert_eq!(wide.next_u64() as u32, narrow.next_u32());
        }
    }

    #[test]
    fn test_golden_words() {
        let mut rng = Xoroshiro128Plus::from_seed(Seed::new(1_700_000_000_000_000));
        assert_eq!(rng.next_u64(), 10_780_544_025_583_931_475);
        assert_eq!(rng.next_u64(), 7_121_370_317_039_813_129);
        assert_eq!(rng.next_u64(), 12_518_899_948_681_261_442);
        assert_eq!(rng.next_u64(), 4_131_138_487_633_408_010);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_rng_core_fill_bytes_matches_words() {
        use rand_core::RngCore;

        let mut bytes_rng = Xoroshiro128Plus::from_seed(Seed::new(5));
        let mut words_rng = Xoroshiro128Plus::from_seed(Seed::new(5));

        let mut buf = [0u8; 16];
        bytes_rng.fill_bytes(&mut buf);

        let mut expected = [0u8; 16];
        expected[..8].copy_from_slice(&words_rng.next_u64().to_le_bytes());
        expected[8..].copy_from_slice(&words_rng.next_u64().to_le_bytes());
        assert_eq!(buf, expected);
    }
}
