//! The shared mutable form of a document tree.

use opal_cow::{SharedList, SharedMap};
use opal_state::{Scalar, State, Value};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A list node of a live tree, shared between writer and readers.
pub type LiveList = SharedList<LiveValue>;

/// A map node of a live tree, shared between writer and readers.
pub type LiveMap = SharedMap<String, LiveValue>;

/// A document property value whose containers are individually shared.
///
/// This is the form a session layer keeps per open document: the writer
/// locks exactly the node it mutates, and readers snapshot subtrees through
/// the copy-on-write views without blocking the writer for longer than a
/// lock acquisition. Scalars are immutable and need no lock.
#[derive(Clone, Debug)]
pub enum LiveValue {
    Null,
    Scalar(Scalar),
    List(LiveList),
    Map(LiveMap),
}

impl LiveValue {
    /// Build a live tree from an owned value, sharing every container.
    pub fn from_value(value: &Value) -> LiveValue {
        match value {
            Value::Null => LiveValue::Null,
            Value::Scalar(s) => LiveValue::Scalar(s.clone()),
            Value::List(items) => LiveValue::List(Arc::new(RwLock::new(
                items.iter().map(LiveValue::from_value).collect(),
            ))),
            Value::State(state) => LiveValue::Map(live_map_from_state(state)),
        }
    }

    /// Deep-read this tree into an owned value, locking each node once.
    ///
    /// This reads the *current* version of every node and offers no
    /// isolation across nodes; take a snapshot first when a single
    /// consistent version matters.
    pub fn to_value(&self) -> Value {
        match self {
            LiveValue::Null => Value::Null,
            LiveValue::Scalar(s) => Value::Scalar(s.clone()),
            LiveValue::List(list) => {
                Value::List(list.read().iter().map(LiveValue::to_value).collect())
            }
            LiveValue::Map(map) => Value::State(
                map.read()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

/// Build a live map node from an owned state.
pub fn live_map_from_state(state: &State) -> LiveMap {
    let entries: BTreeMap<String, LiveValue> = state
        .iter()
        .map(|(k, v)| (k.clone(), LiveValue::from_value(v)))
        .collect();
    Arc::new(RwLock::new(entries))
}
