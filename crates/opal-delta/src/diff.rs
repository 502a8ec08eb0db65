//! Recursive structural diff.
//!
//! `diff` compares two values and produces the smallest patch it knows how
//! to encode. Containers diff key-by-key, lists recognize clean tail
//! growth/shrink, everything else is a full replacement.

use opal_state::{Diff, ListDiff, State, StateDiff, Value};

/// Compute the patch turning `a` into `b`.
///
/// Returns [`Diff::Nop`] iff `a == b`. Total over the value domain: any
/// pairing of tags is accepted, incompatible tags fall back to a full
/// replacement.
pub fn diff(a: &Value, b: &Value) -> Diff {
    if a == b {
        return Diff::Nop;
    }
    match (a, b) {
        (Value::State(sa), Value::State(sb)) => Diff::State(diff_states(sa, sb)),
        (Value::List(la), Value::List(lb)) => diff_lists(la, lb),
        _ => Diff::Set(b.clone()),
    }
}

/// Compute the sparse patch turning state `a` into state `b`.
///
/// Keys only in `b` are carried as replacements, keys only in `a` become
/// tombstones, changed keys recurse, unchanged keys are omitted entirely.
pub fn diff_states(a: &State, b: &State) -> StateDiff {
    let mut patch = StateDiff::new();
    for (key, bv) in b.iter() {
        match a.get(key) {
            None => patch.put(key.clone(), Diff::Set(bv.clone())),
            Some(av) => match diff(av, bv) {
                Diff::Nop => {}
                changed => patch.put(key.clone(), changed),
            },
        }
    }
    for (key, _) in a.iter() {
        if !b.contains_key(key) {
            patch.put(key.clone(), Diff::Removed);
        }
    }
    patch
}

/// List policy, checked in order:
/// tail growth -> `Rpush`, shrink-by-one -> `Rpop`, equal length ->
/// positional diffs, anything else -> full replacement.
fn diff_lists(a: &[Value], b: &[Value]) -> Diff {
    if !a.is_empty() && b.len() > a.len() && b[..a.len()] == *a {
        return Diff::List(ListDiff::Rpush(b[a.len()..].to_vec()));
    }
    if !b.is_empty() && b.len() + 1 == a.len() && a[..b.len()] == *b {
        return Diff::List(ListDiff::Rpop);
    }
    if a.len() == b.len() && !a.is_empty() {
        // Scalar-only lists are replaced wholesale: a positional diff would
        // be no smaller. Positional diffs pay off exactly when an element is
        // a container that can itself be patched sparsely.
        if a.iter().chain(b.iter()).all(|v| v.is_leaf()) {
            return Diff::Set(Value::List(b.to_vec()));
        }
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| diff(x, y)).collect();
        return Diff::List(ListDiff::Full(diffs));
    }
    Diff::Set(Value::List(b.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| Value::from(*s)).collect())
    }

    fn state(entries: &[(&str, Value)]) -> State {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_diff_equal_values_is_nop() {
        assert_eq!(diff(&Value::Null, &Value::Null), Diff::Nop);
        assert_eq!(diff(&Value::from(3i64), &Value::from(3i64)), Diff::Nop);
        assert_eq!(diff(&list(&["A"]), &list(&["A"])), Diff::Nop);
        let s = Value::State(state(&[("k", Value::from("v"))]));
        assert_eq!(diff(&s, &s.clone()), Diff::Nop);
    }

    #[test]
    fn test_diff_scalars_is_replacement() {
        assert_eq!(
            diff(&Value::from(1i64), &Value::from(2i64)),
            Diff::Set(Value::from(2i64))
        );
        // Mismatched tags fall back to replacement too
        assert_eq!(
            diff(&Value::from("one"), &Value::from(1i64)),
            Diff::Set(Value::from(1i64))
        );
        assert_eq!(
            diff(&Value::Null, &Value::from(false)),
            Diff::Set(Value::from(false))
        );
    }

    #[test]
    fn test_list_growth_is_rpush() {
        assert_eq!(
            diff(&list(&["A"]), &list(&["A", "B"])),
            Diff::List(ListDiff::Rpush(vec![Value::from("B")]))
        );
        assert_eq!(
            diff(&list(&["A"]), &list(&["A", "B", "C"])),
            Diff::List(ListDiff::Rpush(vec![Value::from("B"), Value::from("C")]))
        );
    }

    #[test]
    fn test_list_shrink_by_one_is_rpop() {
        assert_eq!(diff(&list(&["A", "B"]), &list(&["A"])), Diff::List(ListDiff::Rpop));
        assert_eq!(
            diff(&list(&["A", "B", "C"]), &list(&["A", "B"])),
            Diff::List(ListDiff::Rpop)
        );
    }

    #[test]
    fn test_empty_list_edges_are_plain_replacements() {
        // Growth from empty is not an Rpush
        assert_eq!(diff(&list(&[]), &list(&["A"])), Diff::Set(list(&["A"])));
        // Shrink to empty is not an Rpop
        assert_eq!(diff(&list(&["A"]), &list(&[])), Diff::Set(list(&[])));
    }

    #[test]
    fn test_list_shrink_by_more_than_one_is_replacement() {
        assert_eq!(
            diff(&list(&["A", "B", "C"]), &list(&["A"])),
            Diff::Set(list(&["A"]))
        );
    }

    #[test]
    fn test_list_non_prefix_growth_is_replacement() {
        assert_eq!(
            diff(&list(&["A", "B"]), &list(&["X", "B", "C"])),
            Diff::Set(list(&["X", "B", "C"]))
        );
    }

    #[test]
    fn test_equal_length_scalar_list_collapses_to_replacement() {
        assert_eq!(
            diff(&list(&["A", "B"]), &list(&["A", "X"])),
            Diff::Set(list(&["A", "X"]))
        );
    }

    #[test]
    fn test_equal_length_list_with_containers_diffs_positionally() {
        let a = Value::List(vec![
            Value::State(state(&[("name", Value::from("a")), ("size", Value::from(1i64))])),
            Value::State(state(&[("name", Value::from("b"))])),
        ]);
        let b = Value::List(vec![
            Value::State(state(&[("name", Value::from("a")), ("size", Value::from(2i64))])),
            Value::State(state(&[("name", Value::from("b"))])),
        ]);

        let mut first = StateDiff::new();
        first.put("size", Diff::Set(Value::from(2i64)));
        assert_eq!(
            diff(&a, &b),
            Diff::List(ListDiff::Full(vec![Diff::State(first), Diff::Nop]))
        );
    }

    #[test]
    fn test_equal_length_list_with_containers_every_index_changed() {
        // Even with no index unchanged, the presence of a container keeps
        // the positional encoding.
        let a = Value::List(vec![
            Value::from("x"),
            Value::State(state(&[("n", Value::from(1i64))])),
        ]);
        let b = Value::List(vec![
            Value::from("y"),
            Value::State(state(&[("n", Value::from(2i64))])),
        ]);

        let mut second = StateDiff::new();
        second.put("n", Diff::Set(Value::from(2i64)));
        assert_eq!(
            diff(&a, &b),
            Diff::List(ListDiff::Full(vec![
                Diff::Set(Value::from("y")),
                Diff::State(second),
            ]))
        );
    }

    #[test]
    fn test_state_added_key() {
        let a = State::new();
        let b = state(&[("A", Value::from("B"))]);

        let mut expected = StateDiff::new();
        expected.put("A", Diff::Set(Value::from("B")));
        assert_eq!(diff_states(&a, &b), expected);
    }

    #[test]
    fn test_state_removed_key_is_tombstone() {
        let a = state(&[("A", Value::from("B"))]);
        let b = State::new();

        let mut expected = StateDiff::new();
        expected.put("A", Diff::Removed);
        assert_eq!(diff_states(&a, &b), expected);
    }

    #[test]
    fn test_state_unchanged_keys_omitted() {
        let a = state(&[("same", Value::from(1i64)), ("old", Value::from(2i64))]);
        let b = state(&[("same", Value::from(1i64)), ("new", Value::from(3i64))]);

        let patch = diff_states(&a, &b);
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("same"), None);
        assert_eq!(patch.get("new"), Some(&Diff::Set(Value::from(3i64))));
        assert_eq!(patch.get("old"), Some(&Diff::Removed));
    }

    #[test]
    fn test_nested_state_diff_recurses() {
        let a = Value::State(state(&[(
            "A",
            Value::State(state(&[("B", Value::from("C"))])),
        )]));
        let b = Value::State(state(&[(
            "A",
            Value::State(state(&[("B", Value::from("D"))])),
        )]));

        let mut inner = StateDiff::new();
        inner.put("B", Diff::Set(Value::from("D")));
        let mut outer = StateDiff::new();
        outer.put("A", Diff::State(inner));

        assert_eq!(diff(&a, &b), Diff::State(outer));
    }

    #[test]
    fn test_container_replaced_by_scalar_is_replacement() {
        let a = Value::State(state(&[("k", Value::from(1i64))]));
        let b = Value::from("flat");
        assert_eq!(diff(&a, &b), Diff::Set(b.clone()));
    }
}
