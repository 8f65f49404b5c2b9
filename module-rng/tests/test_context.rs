//! Tests for per-invocation execution contexts

use module_rng::{ExecutionContext, Random, Randomness, Seed, Timestamp};

const TS: i64 = 1_700_000_000_000_000;

#[test]
fn test_context_seed_comes_from_timestamp() {
    let ctx = ExecutionContext::new(Timestamp::from_micros_since_unix_epoch(TS));
    assert_eq!(ctx.seed(), Seed::new(TS as u64));
    assert_eq!(ctx.timestamp().to_micros_since_unix_epoch(), TS);
}

#[test]
fn test_replayed_invocation_draws_same_values() {
    let run = || {
        let mut ctx = ExecutionContext::new(Timestamp::from_micros_since_unix_epoch(TS));
        let roll = ctx.rng().integer_in_range(1, 6).unwrap();
        let coin = ctx.rng().next_f64() < 0.5;
        let mut id = [0u8; 16];
        ctx.rng().fill(&mut id);
        (roll, coin, id)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_fresh_context_restarts_stream() {
    let ts = Timestamp::from_micros_since_unix_epoch(TS);

    let mut first = ExecutionContext::new(ts);
    let a = first.rng().uint32();
    first.rng().uint32();

    let mut second = ExecutionContext::new(ts);
    assert_eq!(second.rng().uint32(), a);
}

#[test]
fn test_context_matches_standalone_random() {
    let ts = Timestamp::from_micros_since_unix_epoch(TS + 1);
    let mut ctx = ExecutionContext::new(ts);
    let mut random = Random::from_timestamp(ts);

    for _ in 0..50 {
        assert_eq!(
            ctx.rng().bigint_in_range(0i128, 1 << 100).unwrap(),
            random.bigint_in_range(0i128, 1 << 100).unwrap()
        );
    }
}

#[test]
fn test_adjacent_timestamps_diverge() {
    let mut a = ExecutionContext::new(Timestamp::from_micros_since_unix_epoch(TS));
    let mut b = ExecutionContext::new(Timestamp::from_micros_since_unix_epoch(TS + 1));
    let xs: Vec<u32> = (0..4).map(|_| a.rng().uint32()).collect();
    let ys: Vec<u32> = (0..4).map(|_| b.rng().uint32()).collect();
    assert_ne!(xs, ys);
}
