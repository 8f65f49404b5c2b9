//! Transaction time and the seeds derived from it
//!
//! Every reducer or procedure invocation runs at a single transaction
//! timestamp. That timestamp is the only input to the randomness of the
//! invocation, so replaying the invocation with the same timestamp reproduces
//! every random draw.

use serde::{Deserialize, Serialize};

/// A point in time, in microseconds since the Unix epoch
///
/// # Example
/// ```
/// use module_rng::Timestamp;
///
/// let ts = Timestamp::from_micros_since_unix_epoch(1_700_000_000_000_000);
/// assert_eq!(ts.to_micros_since_unix_epoch(), 1_700_000_000_000_000);
/// assert!(ts > Timestamp::UNIX_EPOCH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Microseconds since 1970-01-01T00:00:00Z (negative before the epoch)
    micros_since_unix_epoch: i64,
}

impl Timestamp {
    /// 1970-01-01T00:00:00Z
    pub const UNIX_EPOCH: Self = Self {
        micros_since_unix_epoch: 0,
    };

    /// Create a timestamp from microseconds since the Unix epoch
    pub const fn from_micros_since_unix_epoch(micros: i64) -> Self {
        Self {
            micros_since_unix_epoch: micros,
        }
    }

    /// Microseconds since the Unix epoch
    pub const fn to_micros_since_unix_epoch(self) -> i64 {
        self.micros_since_unix_epoch
    }

    /// The random seed for an invocation running at this timestamp
    ///
    /// Pre-epoch timestamps keep their two's complement bit pattern.
    ///
    /// # Example
    /// ```
    /// use module_rng::Timestamp;
    ///
    /// let ts = Timestamp::from_micros_since_unix_epoch(-1);
    /// assert_eq!(ts.seed().value(), u64::MAX);
    /// ```
    pub const fn seed(self) -> Seed {
        Seed::new(self.micros_since_unix_epoch as u64)
    }
}

/// The 64-bit value that fully determines a generator's output sequence
///
/// # Example
/// ```
/// use module_rng::{Seed, Timestamp};
///
/// let seed = Seed::from(Timestamp::from_micros_since_unix_epoch(42));
/// assert_eq!(seed, Seed::new(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for Seed {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.seed()
    }
}
