//! Read-only snapshot view over a shared map.

use crate::freeze::{Freeze, SharedMap};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;

/// A read-only snapshot of a [`SharedMap`].
///
/// The key set is captured eagerly at construction; values are fetched
/// lazily on first access, frozen through [`Freeze`], and memoized. Keys
/// inserted into the backing map after construction are invisible; a key
/// whose backing entry was removed before its first access reads as `None`,
/// and the absence is memoized.
pub struct CowMap<K: Ord + Clone, T: Freeze> {
    backing: SharedMap<K, T>,
    keys: Vec<K>,
    slots: Mutex<BTreeMap<K, Option<T::Frozen>>>,
}

impl<K: Ord + Clone, T: Freeze> CowMap<K, T> {
    /// Snapshot `backing`, capturing its current key set as the frozen
    /// shape.
    pub fn new(backing: SharedMap<K, T>) -> Self {
        let keys: Vec<K> = backing.read().keys().cloned().collect();
        Self {
            backing,
            keys,
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of keys as of construction.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The frozen key set, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Membership in the frozen key set.
    pub fn contains_key(&self, key: &K) -> bool {
        self.keys.binary_search(key).is_ok()
    }

    /// Read one entry. The first read fetches and freezes the backing
    /// value; every later read returns that same frozen value. Keys outside
    /// the frozen shape always read as `None`.
    pub fn get(&self, key: &K) -> Option<T::Frozen> {
        if !self.contains_key(key) {
            return None;
        }
        let mut slots = self.slots.lock();
        if let Some(cached) = slots.get(key) {
            return cached.clone();
        }
        let frozen = self.backing.read().get(key).map(Freeze::freeze);
        slots.insert(key.clone(), frozen.clone());
        frozen
    }

    /// Iterate the frozen key set, reading (and memoizing) every entry.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Option<T::Frozen>)> + '_ {
        self.keys.iter().map(move |key| (key, self.get(key)))
    }
}

impl<K: Ord + Clone + fmt::Debug, T: Freeze> fmt::Debug for CowMap<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowMap")
            .field("keys", &self.keys)
            .field("memoized", &self.slots.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;

    fn shared(entries: &[(&str, i64)]) -> SharedMap<String, i64> {
        Arc::new(RwLock::new(
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        ))
    }

    #[test]
    fn test_key_set_is_frozen_at_construction() {
        let backing = shared(&[("a", 1), ("b", 2)]);
        let snapshot = CowMap::new(backing.clone());

        backing.write().insert("c".to_string(), 3);
        backing.write().remove("a");

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_key(&"a".to_string()));
        assert!(!snapshot.contains_key(&"c".to_string()));
        assert_eq!(snapshot.get(&"c".to_string()), None);
    }

    #[test]
    fn test_first_read_memoizes_value() {
        let backing = shared(&[("a", 1)]);
        let snapshot = CowMap::new(backing.clone());

        assert_eq!(snapshot.get(&"a".to_string()), Some(1));
        backing.write().insert("a".to_string(), 100);
        assert_eq!(snapshot.get(&"a".to_string()), Some(1));
    }

    #[test]
    fn test_unread_entry_fetches_current_value() {
        let backing = shared(&[("a", 1)]);
        let snapshot = CowMap::new(backing.clone());

        backing.write().insert("a".to_string(), 100);
        assert_eq!(snapshot.get(&"a".to_string()), Some(100));
    }

    #[test]
    fn test_removed_entry_reads_as_absent_and_stays_absent() {
        let backing = shared(&[("a", 1)]);
        let snapshot = CowMap::new(backing.clone());

        backing.write().remove("a");
        assert_eq!(snapshot.get(&"a".to_string()), None);

        backing.write().insert("a".to_string(), 2);
        assert_eq!(snapshot.get(&"a".to_string()), None);
    }

    #[test]
    fn test_iter_yields_frozen_keys_in_order() {
        let backing = shared(&[("b", 2), ("a", 1)]);
        let snapshot = CowMap::new(backing);
        let entries: Vec<_> = snapshot
            .iter()
            .map(|(k, v)| (k.clone(), v))
            .collect();
        assert_eq!(
            entries,
            vec![("a".to_string(), Some(1)), ("b".to_string(), Some(2))]
        );
    }
}
