//! Value types describing sampling requests and scan ranges

pub mod range;

// Re-exports
pub use range::{Bound, Interval, Range, RangeError};
