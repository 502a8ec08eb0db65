//! Opaline - Copy-on-write document-state delta engine
//!
//! Documents are trees of typed properties. Opaline computes minimal
//! deltas between two versions of such a tree, reapplies them on a remote
//! replica, and hands out cheap isolated read-only views of live mutable
//! trees to concurrent readers.
//!
//! The workspace is split by concern:
//! - [`opal_state`]: the value model and the patch vocabulary
//! - [`opal_delta`]: the diff/patch machinery
//! - [`opal_cow`]: generic copy-on-write snapshot views
//! - [`opal_view`]: live shared trees bridging the two
//!
//! # Example
//!
//! ```rust,ignore
//! use opaline::{diff_states, apply_diff, State};
//!
//! let patch = diff_states(&old, &new);   // sparse: changed keys only
//! apply_diff(&mut cached, &patch)?;      // replica converges
//! assert_eq!(cached, new);
//! ```

pub use opal_cow::{CowList, CowMap, Freeze, SharedList, SharedMap};
pub use opal_delta::{
    apply, apply_diff, apply_list_diff, diff, diff_states, reset_deltas, ApplyError,
};
pub use opal_state::{DeltaLong, Diff, ListDiff, Scalar, State, StateDiff, Value};
pub use opal_view::{
    live_map_from_state, snapshot, state_from_snapshot, LiveList, LiveMap, LiveValue,
    SnapshotValue,
};
