//! Opal View - Live document trees and their snapshot views
//!
//! The diff engine works on owned, single-writer [`opal_state::State`]
//! trees. A session layer serving concurrent readers needs a second form:
//! a tree whose containers are shared behind locks, so one writer can keep
//! mutating while readers take cheap isolated snapshots through the
//! copy-on-write views.
//!
//! - `LiveValue` / `LiveList` / `LiveMap`: the shared mutable form
//! - `SnapshotValue`: what a reader sees through a snapshot
//! - `snapshot`: wrap a live tree for reading
//! - `materialize`: walk a snapshot back into an owned `Value`/`State`,
//!   e.g. to serialize a consistent version to a cache or audit log

pub mod live;
pub mod snapshot;

// Re-export main types
pub use live::{live_map_from_state, LiveList, LiveMap, LiveValue};
pub use snapshot::{snapshot, state_from_snapshot, SnapshotValue};
