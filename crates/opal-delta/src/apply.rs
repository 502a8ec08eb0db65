//! Patch application.
//!
//! `apply_diff` replays a sparse patch on a replica's state, in place.
//! Structural mismatches between patch and target are contract violations:
//! the patch was computed against a different shape than the one it is being
//! applied to. They surface as [`ApplyError`]; entries applied before the
//! failure stay applied, recovery belongs to the caller.

use crate::error::{ApplyError, Result};
use opal_state::{DeltaLong, Diff, ListDiff, Scalar, State, StateDiff, Value};
use tracing::trace;

/// Apply a state patch to `target`, converging it to the version the patch
/// was diffed against.
pub fn apply_diff(target: &mut State, diff: &StateDiff) -> Result<()> {
    apply_state_diff(target, diff, "")
}

/// Apply a list patch to `list`.
pub fn apply_list_diff(list: &mut Vec<Value>, diff: &ListDiff) -> Result<()> {
    apply_list(list, diff, "")
}

/// Apply any diff to a single value slot. `Removed` is only meaningful
/// inside a state patch and is rejected here.
pub fn apply(target: &mut Value, diff: &Diff) -> Result<()> {
    apply_value(target, diff, "")
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn apply_state_diff(target: &mut State, diff: &StateDiff, prefix: &str) -> Result<()> {
    for (key, entry) in diff.iter() {
        let path = join(prefix, key);
        match entry {
            Diff::Nop => {}
            Diff::Removed => {
                trace!(key = %path, "removing key");
                target.remove(key);
            }
            Diff::State(nested) => match target.get_mut(key) {
                Some(Value::State(state)) => apply_state_diff(state, nested, &path)?,
                Some(other) => {
                    return Err(ApplyError::TypeMismatch {
                        path,
                        expected: "state",
                        found: other.type_name(),
                    })
                }
                None => return Err(ApplyError::KeyNotFound(path)),
            },
            Diff::List(nested) => match target.get_mut(key) {
                Some(Value::List(list)) => apply_list(list, nested, &path)?,
                Some(other) => {
                    return Err(ApplyError::TypeMismatch {
                        path,
                        expected: "list",
                        found: other.type_name(),
                    })
                }
                None => return Err(ApplyError::KeyNotFound(path)),
            },
            Diff::Set(value) => {
                let resolved = resolve_set(target.get(key), value, &path)?;
                target.put(key.clone(), resolved);
            }
        }
    }
    Ok(())
}

fn apply_list(list: &mut Vec<Value>, diff: &ListDiff, path: &str) -> Result<()> {
    match diff {
        ListDiff::Rpush(values) => {
            trace!(path = %path, count = values.len(), "appending to list");
            list.extend(values.iter().cloned());
        }
        ListDiff::Rpop => {
            trace!(path = %path, "popping list tail");
            if list.pop().is_none() {
                return Err(ApplyError::PopFromEmpty(path.to_string()));
            }
        }
        ListDiff::Full(diffs) => {
            if diffs.len() != list.len() {
                return Err(ApplyError::LengthMismatch {
                    path: path.to_string(),
                    expected: diffs.len(),
                    found: list.len(),
                });
            }
            for (index, entry) in diffs.iter().enumerate() {
                let slot_path = join(path, &index.to_string());
                apply_value(&mut list[index], entry, &slot_path)?;
            }
        }
    }
    Ok(())
}

fn apply_value(slot: &mut Value, diff: &Diff, path: &str) -> Result<()> {
    match diff {
        Diff::Nop => {}
        Diff::Removed => return Err(ApplyError::UnexpectedRemoval(path.to_string())),
        Diff::Set(value) => {
            *slot = resolve_set(Some(slot), value, path)?;
        }
        Diff::State(nested) => match slot {
            Value::State(state) => apply_state_diff(state, nested, path)?,
            other => {
                return Err(ApplyError::TypeMismatch {
                    path: path.to_string(),
                    expected: "state",
                    found: other.type_name(),
                })
            }
        },
        Diff::List(nested) => match slot {
            Value::List(list) => apply_list(list, nested, path)?,
            other => {
                return Err(ApplyError::TypeMismatch {
                    path: path.to_string(),
                    expected: "list",
                    found: other.type_name(),
                })
            }
        },
    }
    Ok(())
}

/// Resolve a replacement value against the slot it lands in.
///
/// Plain values overwrite. An incremental [`DeltaLong`] adds to whatever
/// number the slot currently holds, so bumps from several writers compose;
/// landing on a non-numeric slot is a contract violation.
fn resolve_set(old: Option<&Value>, value: &Value, path: &str) -> Result<Value> {
    let delta = match value {
        Value::Scalar(Scalar::Delta(d)) => d,
        _ => return Ok(value.clone()),
    };
    match old {
        None | Some(Value::Null) => Ok(Value::from(delta.full_value())),
        Some(Value::Scalar(Scalar::Long(n))) => Ok(Value::from(n + delta.increment())),
        Some(Value::Scalar(Scalar::Delta(prior))) => Ok(Value::from(DeltaLong::new(
            prior.base(),
            prior.increment() + delta.increment(),
        ))),
        Some(other) => Err(ApplyError::TypeMismatch {
            path: path.to_string(),
            expected: "long",
            found: other.type_name(),
        }),
    }
}

/// Recursively replace every incremental counter in `state` with its plain
/// resolved value. Used before handing a tree to a consumer that must not
/// see unresolved increments.
pub fn reset_deltas(state: &mut State) {
    for value in state.values_mut() {
        reset_value_deltas(value);
    }
}

fn reset_value_deltas(value: &mut Value) {
    match value {
        Value::Scalar(Scalar::Delta(d)) => *value = Value::from(d.full_value()),
        Value::State(state) => reset_deltas(state),
        Value::List(list) => {
            for item in list.iter_mut() {
                reset_value_deltas(item);
            }
        }
        _ => {}
    }
}
