//! Snapshot views of live trees.

use crate::live::{LiveMap, LiveValue};
use opal_cow::{CowList, CowMap, Freeze};
use opal_state::{Scalar, State, Value};
use std::sync::Arc;

/// What a reader sees through a snapshot: scalars as-is, containers as
/// copy-on-write views that keep extending the snapshot guarantee lazily,
/// one level per first access.
#[derive(Clone)]
pub enum SnapshotValue {
    Null,
    Scalar(Scalar),
    List(Arc<CowList<LiveValue>>),
    Map(Arc<CowMap<String, LiveValue>>),
}

impl Freeze for LiveValue {
    type Frozen = SnapshotValue;

    fn freeze(&self) -> SnapshotValue {
        match self {
            LiveValue::Null => SnapshotValue::Null,
            LiveValue::Scalar(s) => SnapshotValue::Scalar(s.clone()),
            LiveValue::List(list) => SnapshotValue::List(Arc::new(CowList::new(list.clone()))),
            LiveValue::Map(map) => SnapshotValue::Map(Arc::new(CowMap::new(map.clone()))),
        }
    }
}

/// Take an isolated read-only snapshot of a live document tree.
pub fn snapshot(root: &LiveMap) -> Arc<CowMap<String, LiveValue>> {
    Arc::new(CowMap::new(root.clone()))
}

impl SnapshotValue {
    /// Walk this snapshot into an owned value.
    ///
    /// Every slot is read through the memo cache, so repeated calls agree
    /// with each other and with any earlier partial reads: the result is
    /// one consistent version of the subtree. A slot whose backing entry
    /// vanished before its first access materializes as `Value::Null`; the
    /// frozen shape governs enumeration, not value presence.
    pub fn materialize(&self) -> Value {
        match self {
            SnapshotValue::Null => Value::Null,
            SnapshotValue::Scalar(s) => Value::Scalar(s.clone()),
            SnapshotValue::List(view) => Value::List(
                view.iter()
                    .map(|slot| slot.map_or(Value::Null, |v| v.materialize()))
                    .collect(),
            ),
            SnapshotValue::Map(view) => Value::State(state_from_snapshot(view)),
        }
    }
}

/// Materialize a snapshot view of a map node into an owned [`State`].
pub fn state_from_snapshot(view: &CowMap<String, LiveValue>) -> State {
    view.iter()
        .map(|(key, slot)| {
            (
                key.clone(),
                slot.map_or(Value::Null, |v| v.materialize()),
            )
        })
        .collect()
}
