//! Read-only snapshot view over a shared list.

use crate::freeze::{Freeze, SharedList};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;

/// A read-only snapshot of a [`SharedList`].
///
/// The length is captured eagerly at construction; element values are
/// fetched lazily on first access, frozen through [`Freeze`], and memoized.
/// A slot whose backing element was removed before its first access reads
/// as `None`, and the absence is memoized like any other result.
///
/// Shared safely between reader threads: the memo table is guarded by a
/// per-wrapper mutex so concurrent first reads of one slot converge on a
/// single cached value.
pub struct CowList<T: Freeze> {
    backing: SharedList<T>,
    len: usize,
    slots: Mutex<BTreeMap<usize, Option<T::Frozen>>>,
}

impl<T: Freeze> CowList<T> {
    /// Snapshot `backing`, capturing its current length as the frozen shape.
    pub fn new(backing: SharedList<T>) -> Self {
        let len = backing.read().len();
        Self {
            backing,
            len,
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// The length as of construction, regardless of later backing mutation.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read one slot. The first read fetches and freezes the backing
    /// element; every later read returns that same frozen value.
    pub fn get(&self, index: usize) -> Option<T::Frozen> {
        if index >= self.len {
            return None;
        }
        let mut slots = self.slots.lock();
        if let Some(cached) = slots.get(&index) {
            return cached.clone();
        }
        let frozen = self.backing.read().get(index).map(Freeze::freeze);
        slots.insert(index, frozen.clone());
        frozen
    }

    /// Iterate the frozen shape, reading (and memoizing) every slot.
    pub fn iter(&self) -> impl Iterator<Item = Option<T::Frozen>> + '_ {
        (0..self.len).map(move |index| self.get(index))
    }
}

impl<T: Freeze> fmt::Debug for CowList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowList")
            .field("len", &self.len)
            .field("memoized", &self.slots.lock().len())
            .finish()
    }
}
