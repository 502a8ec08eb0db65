//! Leaf values: scalars and incremental numerics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An incremental numeric value.
///
/// Carries the value a counter had when it was read (`base`) together with
/// the increment applied since. A replica receiving one inside a patch can
/// turn it into an atomic add instead of a blind overwrite, so concurrent
/// bumps from several nodes compose instead of clobbering each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaLong {
    base: i64,
    increment: i64,
}

impl DeltaLong {
    pub fn new(base: i64, increment: i64) -> Self {
        Self { base, increment }
    }

    /// The counter value this increment was computed against.
    pub fn base(&self) -> i64 {
        self.base
    }

    /// The increment itself.
    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// The resolved value: base plus increment.
    pub fn full_value(&self) -> i64 {
        self.base + self.increment
    }
}

/// A leaf value. Scalars have no sub-structure and are compared by value;
/// byte sequences by content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    /// An unresolved counter bump, see [`DeltaLong`].
    Delta(DeltaLong),
}

/// Scalar equality is native value equality, with one addition: an
/// unresolved `Delta` equals the `Long` holding its full value, so an
/// untouched counter never registers as a change.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        use Scalar::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Double(a), Double(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            (Delta(a), Delta(b)) => a == b,
            (Delta(d), Long(n)) | (Long(n), Delta(d)) => d.full_value() == *n,
            _ => false,
        }
    }
}

impl Scalar {
    /// Short tag name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Long(_) => "long",
            Scalar::Double(_) => "double",
            Scalar::String(_) => "string",
            Scalar::Bytes(_) => "bytes",
            Scalar::Timestamp(_) => "timestamp",
            Scalar::Delta(_) => "delta",
        }
    }
}
