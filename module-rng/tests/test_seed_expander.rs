//! Tests for seed expansion
//!
//! CRITICAL: These values come from the reference implementation. A mismatch
//! means every module on this host draws different numbers than everywhere else.

use module_rng::rng::{expand_seed, Xoroshiro128Plus};
use module_rng::{Seed, Timestamp};

#[test]
fn test_expand_seed_zero() {
    assert_eq!(expand_seed(Seed::new(0)), 4_185_125_612);
}

#[test]
fn test_expand_seed_golden_pairs() {
    let pairs: [(u64, u32); 5] = [
        (0, 4_185_125_612),
        (1, 1_914_558_698),
        (12345, 453_577_086),
        (1_700_000_000_000_000, 1_784_926_291),
        (u64::MAX, 3_818_014_511),
    ];

    for (seed, expected) in pairs {
        assert_eq!(
            expand_seed(Seed::new(seed)),
            expected,
            "expand_seed({}) diverged from reference",
            seed
        );
    }
}

#[test]
fn test_pre_epoch_timestamp_matches_unsigned_seed() {
    let ts = Timestamp::from_micros_since_unix_epoch(-1);
    assert_eq!(expand_seed(ts.seed()), 3_818_014_511);
}

#[test]
fn test_generator_first_word_carries_expanded_seed() {
    let mut rng = Xoroshiro128Plus::from_seed(Seed::new(1_700_000_000_000_000));
    assert_eq!(rng.next_u32(), 1_784_926_291);
}
