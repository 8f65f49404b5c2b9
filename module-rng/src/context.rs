//! Per-invocation execution context
//!
//! The dispatch layer creates one [`ExecutionContext`] for every reducer or
//! procedure call, stamped with the transaction timestamp. Randomness is built
//! lazily on first use so invocations that never draw pay nothing.

use crate::core::{Seed, Timestamp};
use crate::rng::Random;
use tracing::debug;

/// State scoped to a single reducer or procedure invocation
///
/// # Example
/// ```
/// use module_rng::{ExecutionContext, Randomness, Timestamp};
///
/// let mut ctx = ExecutionContext::new(Timestamp::from_micros_since_unix_epoch(1_700_000_000_000_000));
/// let first = ctx.rng().integer_in_range(1, 6).unwrap();
/// let second = ctx.rng().integer_in_range(1, 6).unwrap();
/// assert_eq!((first, second), (4, 4));
/// ```
#[derive(Debug)]
pub struct ExecutionContext {
    timestamp: Timestamp,
    rng: Option<Random>,
}

impl ExecutionContext {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            rng: None,
        }
    }

    /// Timestamp of the transaction this invocation runs in
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Seed every draw in this invocation derives from
    pub fn seed(&self) -> Seed {
        self.timestamp.seed()
    }

    /// Randomness for this invocation
    ///
    /// The first call seeds a generator from the timestamp; later calls
    /// continue the same stream.
    pub fn rng(&mut self) -> &mut Random {
        let timestamp = self.timestamp;
        self.rng.get_or_insert_with(|| {
            debug!(
                micros = timestamp.to_micros_since_unix_epoch(),
                "creating invocation randomness"
            );
            Random::from_timestamp(timestamp)
        })
    }

    /// Whether any randomness has been requested yet
    pub fn rng_initialized(&self) -> bool {
        self.rng.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomness;

    #[test]
    fn test_rng_is_lazy() {
        let mut ctx = ExecutionContext::new(Timestamp::UNIX_EPOCH);
        assert!(!ctx.rng_initialized());
        ctx.rng();
        assert!(ctx.rng_initialized());
    }

    #[test]
    fn test_rng_continues_stream_across_calls() {
        let mut ctx = ExecutionContext::new(Timestamp::UNIX_EPOCH);
        let mut direct = Random::new(Seed::new(0));

        let a = ctx.rng().uint32();
        let b = ctx.rng().uint32();
        assert_eq!((a, b), (direct.uint32(), direct.uint32()));
    }
}
