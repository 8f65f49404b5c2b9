//! Replay traces - record and verify the randomness of one invocation
//!
//! A trace captures a seed, the sequence of randomness calls made against it
//! and every value those calls returned. Any host can replay the calls from
//! the seed and check that it produces the same values, which is how
//! cross-host determinism is audited.
//!
//! # Critical Invariants
//!
//! - **Determinism**: same seed + same ops produces identical outputs
//! - **Bit exactness**: floats are stored and hashed as IEEE-754 bit patterns
//! - **Canonical digest**: the digest depends only on output values, never on
//!   JSON formatting

use crate::core::Seed;
use crate::models::RangeError;
use crate::rng::{Random, Randomness};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while recording or verifying a trace
#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    #[error("Invalid range at step {step}: {source}")]
    Range {
        step: usize,
        #[source]
        source: RangeError,
    },

    #[error("Replay diverged at step {step}")]
    Divergence { step: usize },

    #[error("Trace has {actual} outputs for {expected} operations")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Trace serialization failed: {0}")]
    Serialization(String),
}

/// Element type of a buffer passed to `fill`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
}

/// One randomness call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceOp {
    Float,
    Uint32,
    IntegerInRange { min: i64, max: i64 },
    BigintInRange { min: i128, max: i128 },
    Fill { element: ElementKind, len: usize },
}

/// The value one call returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceValue {
    Float(#[serde(with = "float_bits")] f64),
    Uint32(u32),
    Integer(i64),
    Bigint(i128),
    /// Unsigned bit pattern of each element
    Fill(Vec<u128>),
}

mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

/// A recorded sequence of randomness calls and their results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub seed: u64,
    pub ops: Vec<TraceOp>,
    pub outputs: Vec<TraceValue>,
}

impl Trace {
    /// Run `ops` against a fresh generator and record the results
    ///
    /// # Example
    /// ```
    /// use module_rng::trace::{Trace, TraceOp, TraceValue};
    /// use module_rng::Seed;
    ///
    /// let trace = Trace::record(Seed::new(0), &[TraceOp::Uint32]).unwrap();
    /// assert_eq!(trace.outputs, vec![TraceValue::Uint32(4_185_125_612)]);
    /// ```
    pub fn record(seed: Seed, ops: &[TraceOp]) -> Result<Self, TraceError> {
        let outputs = run(seed, ops)?;
        Ok(Self {
            seed: seed.value(),
            ops: ops.to_vec(),
            outputs,
        })
    }

    /// Replay the trace from its seed, stopping at the first output that differs
    ///
    /// A `Fill` step whose recorded output does not have `len` elements is a
    /// divergence before anything is drawn, so the buffer a replay allocates
    /// is never larger than the recorded one.
    pub fn verify(&self) -> Result<(), TraceError> {
        if self.ops.len() != self.outputs.len() {
            return Err(TraceError::LengthMismatch {
                expected: self.ops.len(),
                actual: self.outputs.len(),
            });
        }

        let mut random = Random::new(Seed::new(self.seed));
        for (step, (op, expected)) in self.ops.iter().zip(&self.outputs).enumerate() {
            if !fill_len_matches(op, expected) {
                debug!(step, seed = self.seed, "fill length differs from recorded output");
                return Err(TraceError::Divergence { step });
            }
            let actual = apply_step(&mut random, step, op)?;
            if !same_value(&actual, expected) {
                debug!(step, seed = self.seed, "trace replay diverged");
                return Err(TraceError::Divergence { step });
            }
        }
        Ok(())
    }

    /// SHA-256 over the canonical encoding of the outputs, as lowercase hex
    ///
    /// Each output is a tag byte followed by its little-endian payload:
    /// `0` float bits (u64), `1` u32, `2` i64, `3` i128, `4` element count
    /// (u64) then each element as 16 bytes.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for value in &self.outputs {
            match value {
                TraceValue::Float(v) => {
                    hasher.update([0u8]);
                    hasher.update(v.to_bits().to_le_bytes());
                }
                TraceValue::Uint32(v) => {
                    hasher.update([1u8]);
                    hasher.update(v.to_le_bytes());
                }
                TraceValue::Integer(v) => {
                    hasher.update([2u8]);
                    hasher.update(v.to_le_bytes());
                }
                TraceValue::Bigint(v) => {
                    hasher.update([3u8]);
                    hasher.update(v.to_le_bytes());
                }
                TraceValue::Fill(elements) => {
                    hasher.update([4u8]);
                    hasher.update((elements.len() as u64).to_le_bytes());
                    for element in elements {
                        hasher.update(element.to_le_bytes());
                    }
                }
            }
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn to_json(&self) -> Result<String, TraceError> {
        serde_json::to_string_pretty(self).map_err(|e| TraceError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        serde_json::from_str(json).map_err(|e| TraceError::Serialization(e.to_string()))
    }
}

/// Floats compare by bit pattern, everything else structurally
fn same_value(a: &TraceValue, b: &TraceValue) -> bool {
    match (a, b) {
        (TraceValue::Float(x), TraceValue::Float(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

/// Non-fill ops always pass; the recorded value's variant is checked on replay
fn fill_len_matches(op: &TraceOp, expected: &TraceValue) -> bool {
    match (op, expected) {
        (TraceOp::Fill { len, .. }, TraceValue::Fill(elements)) => elements.len() == *len,
        (TraceOp::Fill { .. }, _) => false,
        _ => true,
    }
}

fn run(seed: Seed, ops: &[TraceOp]) -> Result<Vec<TraceValue>, TraceError> {
    let mut random = Random::new(seed);
    ops.iter()
        .enumerate()
        .map(|(step, op)| apply_step(&mut random, step, op))
        .collect()
}

fn apply_step(random: &mut Random, step: usize, op: &TraceOp) -> Result<TraceValue, TraceError> {
    apply(random, op).map_err(|source| TraceError::Range { step, source })
}

fn apply(random: &mut Random, op: &TraceOp) -> Result<TraceValue, RangeError> {
    Ok(match *op {
        TraceOp::Float => TraceValue::Float(random.next_f64()),
        TraceOp::Uint32 => TraceValue::Uint32(random.uint32()),
        TraceOp::IntegerInRange { min, max } => TraceValue::Integer(random.integer_in_range(min, max)?),
        TraceOp::BigintInRange { min, max } => TraceValue::Bigint(random.bigint_in_range(min, max)?),
        TraceOp::Fill { element, len } => TraceValue::Fill(fill_words(random, element, len)),
    })
}

fn fill_words(random: &mut Random, element: ElementKind, len: usize) -> Vec<u128> {
    macro_rules! fill_as {
        ($ty:ty => $unsigned:ty) => {{
            let mut buffer = vec![<$ty>::default(); len];
            random
                .fill(buffer.as_mut_slice())
                .iter()
                .map(|&v| u128::from(v as $unsigned))
                .collect()
        }};
    }

    match element {
        ElementKind::I8 => fill_as!(i8 => u8),
        ElementKind::U8 => fill_as!(u8 => u8),
        ElementKind::I16 => fill_as!(i16 => u16),
        ElementKind::U16 => fill_as!(u16 => u16),
        ElementKind::I32 => fill_as!(i32 => u32),
        ElementKind::U32 => fill_as!(u32 => u32),
        ElementKind::I64 => fill_as!(i64 => u64),
        ElementKind::U64 => fill_as!(u64 => u64),
        ElementKind::I128 => fill_as!(i128 => u128),
        ElementKind::U128 => fill_as!(u128 => u128),
    }
}
