//! Module RNG - deterministic randomness for transactional modules
//!
//! Reducers and procedures run inside a host sandbox and may be replayed on
//! any host. Every random value they draw is derived from the transaction
//! timestamp alone, through a fixed pipeline that is bit-compatible with the
//! reference implementation.
//!
//! # Architecture
//!
//! - **core**: Timestamps and seeds
//! - **models**: Sampling ranges and index-scan bounds
//! - **rng**: Seed expansion, xoroshiro128+ and uniform sampling
//! - **context**: Per-invocation execution context
//! - **trace**: Replay traces for cross-host audits
//!
//! # Critical Invariants
//!
//! 1. Same seed + same calls → same outputs, on every host
//! 2. One generator per invocation, never shared or cloned
//! 3. Reversed ranges are rejected without consuming randomness
//!
//! Not suitable for secrets: the generator is not cryptographically secure.

// Module declarations
pub mod context;
pub mod core;
pub mod models;
pub mod rng;
pub mod trace;

// Re-exports for convenience
pub use context::ExecutionContext;
pub use crate::core::time::{Seed, Timestamp};
pub use models::range::{Bound, Interval, Range, RangeError};
pub use rng::{Random, Randomness};
pub use trace::{Trace, TraceError};
