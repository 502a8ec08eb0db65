//! The sparse patch vocabulary: `Diff`, `StateDiff`, `ListDiff`.
//!
//! A patch describes changes only. Keys absent from a `StateDiff` are
//! unchanged and must be left untouched when the patch is applied.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result of diffing two values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diff {
    /// No change. The short-circuit result of diffing equal values.
    Nop,
    /// Full replacement; also carries the value of a brand-new key.
    Set(Value),
    /// Tombstone: the key was removed. Deliberately distinct from
    /// `Set(Value::Null)` so a field genuinely holding null stays
    /// representable.
    Removed,
    /// Patch the existing container in place instead of replacing it.
    State(StateDiff),
    /// Patch the existing list in place instead of replacing it.
    List(ListDiff),
}

impl Diff {
    pub fn is_nop(&self) -> bool {
        matches!(self, Diff::Nop)
    }
}

/// A sparse patch over a `State`: only changed keys appear.
///
/// Never constructed with zero entries except as the canonical form that
/// collapses to [`Diff::Nop`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDiff {
    entries: BTreeMap<String, Diff>,
}

impl StateDiff {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, diff: Diff) {
        self.entries.insert(key.into(), diff);
    }

    pub fn get(&self, key: &str) -> Option<&Diff> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Diff)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Diff)> for StateDiff {
    fn from_iter<I: IntoIterator<Item = (String, Diff)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One of three mutually exclusive encodings of a change to a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ListDiff {
    /// A same-length array of per-index diffs, applied positionally.
    /// `Removed` is not a legal element.
    Full(Vec<Diff>),
    /// Elements appended at the tail; the existing prefix is unchanged.
    Rpush(Vec<Value>),
    /// Remove exactly one trailing element; the prefix is unchanged.
    Rpop,
}
