//! Opal State - Value model for document property trees
//!
//! Documents are persisted as trees of typed properties. This crate defines
//! the types every other Opaline crate exchanges:
//! - `Value`: the universal tagged union (null, scalar, state, list)
//! - `State`: a string-keyed container of values
//! - `Diff` / `StateDiff` / `ListDiff`: the sparse patch vocabulary
//!
//! The types here are plain tree-shaped data: transient, immutable once
//! produced, and free of identity or ownership semantics.

pub mod diff;
pub mod scalar;
pub mod state;
pub mod value;

// Re-export main types for convenience
pub use diff::{Diff, ListDiff, StateDiff};
pub use scalar::{DeltaLong, Scalar};
pub use state::State;
pub use value::Value;
