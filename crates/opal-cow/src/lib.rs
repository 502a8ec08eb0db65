//! Opal COW - Copy-on-write snapshot views
//!
//! Read-only wrappers that isolate readers from a concurrently mutated
//! backing collection without deep-copying it:
//! - `CowList` / `CowMap`: eager shape capture, lazy memoized element reads
//! - `Freeze`: the seam deciding how an element is snapshotted on first read
//!
//! # Contract
//!
//! Construction captures the backing collection's *shape* (length or key
//! set) as of that moment; later insertions and removals in the backing
//! collection never show through. Element values are fetched on first
//! access, frozen through [`Freeze`], and cached, so a reader that has
//! observed a slot keeps seeing that one version for the wrapper's whole
//! lifetime. Nested shared collections freeze into nested wrappers at the
//! moment of first access, giving the same guarantee one level deeper,
//! transitively.
//!
//! This is cheaper than a deep copy (only touched subtrees are ever
//! snapshotted) and needs no cooperation from the writer beyond sharing the
//! backing collection behind its lock.
//!
//! There is no write path. Mutation goes through the original collection.

pub mod freeze;
pub mod list;
pub mod map;

// Re-export main types
pub use freeze::{Freeze, SharedList, SharedMap};
pub use list::CowList;
pub use map::CowMap;
