//! Core value types shared by every layer

pub mod time;

pub use time::{Seed, Timestamp};
