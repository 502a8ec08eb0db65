//! Opal Delta - Diff/patch machinery over document property trees
//!
//! This crate implements the delta engine:
//! - `diff` computes the minimal patch turning one value into another
//! - `apply_diff` replays such a patch on a replica's state
//! - `reset_deltas` flattens incremental counters to plain values
//!
//! # Diff/ship/apply cycle
//!
//! ```text
//! On flush of document d:
//!   patch = diff(old, new)      // sparse, changed keys only
//!   ship(patch)                 // transport owned by the caller
//!
//! On receipt at a replica:
//!   apply_diff(cached, patch)   // converges cached to new
//! ```
//!
//! All functions are pure and stateless: safe to call from any number of
//! threads as long as no argument is concurrently mutated during the call.
//! `apply_diff` mutates its target in place and relies on the caller's
//! single-writer discipline for that state instance.
//!
//! Structural mismatches between a patch and its target are contract
//! violations and surface as [`ApplyError`], never as silent repair.
//!
//! # Example
//!
//! ```rust,ignore
//! use opal_state::State;
//! use opal_delta::{diff_states, apply_diff};
//!
//! let patch = diff_states(&old, &new);
//! apply_diff(&mut cached, &patch)?;
//! assert_eq!(cached, new);
//! ```

pub mod apply;
pub mod diff;
pub mod error;

// Re-export main entry points
pub use apply::{apply, apply_diff, apply_list_diff, reset_deltas};
pub use diff::{diff, diff_states};
pub use error::{ApplyError, Result};
