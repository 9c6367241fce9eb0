use std::collections::BTreeMap;

use proptest::prelude::*;
use prtree::PrTreeMap;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// How often the full structural invariant check runs during a case. The
/// check is O(n), so running it after every operation would dominate the
/// test budget without finding anything a periodic check misses.
const CHECK_EVERY: usize = 64;

/// Generates keys from a range small enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    TryInsert(i64, i64),
    GetOrInsert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::TryInsert(k, v)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::GetOrInsert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays a random operation sequence on both PrTreeMap and BTreeMap and
    /// asserts identical results at every step, with periodic full structural
    /// invariant checks on the tree.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut pr_map: PrTreeMap<i64, i64> = PrTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for (i, op) in ops.iter().enumerate() {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(pr_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::TryInsert(k, v) => {
                    let pr_result = pr_map.try_insert(*k, *v).map(|v| *v).map_err(|e| e.value);
                    let bt_result = if bt_map.contains_key(k) {
                        Err(*v)
                    } else {
                        bt_map.insert(*k, *v);
                        Ok(*v)
                    };
                    prop_assert_eq!(pr_result, bt_result, "try_insert({}, {})", k, v);
                }
                MapOp::GetOrInsert(k, v) => {
                    let pr_result = *pr_map.get_or_insert(*k, *v);
                    let bt_result = *bt_map.entry(*k).or_insert(*v);
                    prop_assert_eq!(pr_result, bt_result, "get_or_insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(pr_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(pr_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(pr_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(pr_map.get_key_value(k), bt_map.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(pr_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(pr_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(pr_map.pop_first(), bt_map.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(pr_map.pop_last(), bt_map.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(pr_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(pr_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
            if i % CHECK_EVERY == 0 {
                pr_map.assert_invariants();
            }
        }
        pr_map.assert_invariants();
    }

    /// Tests that iteration matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut pr_map: PrTreeMap<i64, i64> = PrTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for (k, v) in &entries {
            pr_map.insert(*k, *v);
            bt_map.insert(*k, *v);
        }

        // Forward iteration
        let pr_items: Vec<_> = pr_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&pr_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let pr_rev: Vec<_> = pr_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&pr_rev, &bt_rev, "iter().rev() mismatch");

        // Keys
        let pr_keys: Vec<_> = pr_map.keys().copied().collect();
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();
        prop_assert_eq!(&pr_keys, &bt_keys, "keys() mismatch");

        // Values
        let pr_vals: Vec<_> = pr_map.values().copied().collect();
        let bt_vals: Vec<_> = bt_map.values().copied().collect();
        prop_assert_eq!(&pr_vals, &bt_vals, "values() mismatch");

        // into_iter
        let pr_into: Vec<_> = pr_map.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_map.clone().into_iter().collect();
        prop_assert_eq!(&pr_into, &bt_into, "into_iter() mismatch");

        // walk visits everything in order when the visitor never stops
        let mut walked = Vec::with_capacity(pr_map.len());
        let visited = pr_map.walk(|&k, &v| {
            walked.push((k, v));
            true
        });
        prop_assert_eq!(visited, bt_map.len(), "walk() count mismatch");
        prop_assert_eq!(&walked, &bt_items, "walk() order mismatch");
    }

    /// Inserting N keys and removing all N in an arbitrary order leaves an
    /// empty tree.
    #[test]
    fn insert_remove_round_trip(
        keys in proptest::collection::hash_set(key_strategy(), 1..512),
        seed in any::<u64>(),
    ) {
        let mut pr_map: PrTreeMap<i64, i64> = PrTreeMap::new();
        let keys: Vec<i64> = keys.into_iter().collect();
        for &k in &keys {
            pr_map.insert(k, k);
        }
        prop_assert_eq!(pr_map.len(), keys.len());

        // Remove in an order decorrelated from insertion order.
        let mut removal = keys.clone();
        let mut state = seed | 1;
        for i in (1..removal.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            removal.swap(i, (state >> 33) as usize % (i + 1));
        }
        for &k in &removal {
            prop_assert_eq!(pr_map.remove(&k), Some(k));
        }

        prop_assert_eq!(pr_map.len(), 0);
        prop_assert!(pr_map.is_empty());
        prop_assert_eq!(pr_map.first_key_value(), None);
        pr_map.assert_invariants();
    }
}

// ─── Deterministic scenarios ─────────────────────────────────────────────────

mod scenarios {
    use pretty_assertions::assert_eq;
    use prtree::PrTreeMap;

    #[test]
    fn walk_yields_sorted_keys() {
        let mut map = PrTreeMap::new();
        for k in [5, 3, 8, 1, 4, 7, 9] {
            map.insert(k, ());
        }

        let mut keys = Vec::new();
        let visited = map.walk(|&k, _| {
            keys.push(k);
            true
        });

        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(visited, 7);
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn walk_stops_early_when_visitor_says_so() {
        let map = PrTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')]);

        let mut seen = Vec::new();
        let visited = map.walk(|&k, _| {
            seen.push(k);
            k < 3
        });

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(visited, 3);
    }

    #[test]
    fn non_overwriting_duplicate_is_rejected() {
        let mut map = PrTreeMap::new();
        assert!(map.try_insert(5, "a").is_ok());

        let err = map.try_insert(5, "b").unwrap_err();
        assert_eq!(err.value, "b");
        assert_eq!(*err.entry.get(), "a");

        assert_eq!(map.get(&5), Some(&"a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn overwriting_insert_reports_the_old_value() {
        let mut map = PrTreeMap::new();
        assert_eq!(map.insert(5, "a"), None);
        assert_eq!(map.insert(5, "b"), Some("a"));
        assert_eq!(map.get(&5), Some(&"b"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn removing_a_missing_key_changes_nothing() {
        let mut map = PrTreeMap::from([(1, "a"), (2, "b")]);
        assert_eq!(map.remove(&99), None);
        assert_eq!(map.len(), 2);
        map.assert_invariants();
    }

    #[test]
    fn search_is_idempotent() {
        let mut map = PrTreeMap::new();
        map.insert(7, "seven");
        for _ in 0..3 {
            assert_eq!(map.get(&7), Some(&"seven"));
            assert_eq!(map.len(), 1);
        }
        map.assert_invariants();
    }

    #[test]
    fn entry_api_round_trip() {
        let mut map: PrTreeMap<&str, usize> = PrTreeMap::new();

        for word in ["to", "be", "or", "not", "to", "be"] {
            *map.entry(word).or_insert(0) += 1;
        }

        assert_eq!(map[&"to"], 2);
        assert_eq!(map[&"be"], 2);
        assert_eq!(map[&"or"], 1);
        assert_eq!(map[&"not"], 1);

        map.entry("or").and_modify(|n| *n += 10);
        assert_eq!(map[&"or"], 11);

        if let prtree::pr_tree_map::Entry::Occupied(o) = map.entry("not") {
            assert_eq!(o.remove_entry(), ("not", 1));
        }
        assert_eq!(map.len(), 3);
        map.assert_invariants();
    }

    #[test]
    fn custom_comparator_orders_the_map() {
        let mut map = PrTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        for k in [1, 5, 3, 2, 4] {
            map.insert(k, k * k);
        }

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
        assert_eq!(map.first_key_value(), Some((&5, &25)));
        assert_eq!(map.last_key_value(), Some((&1, &1)));
        map.assert_invariants();
    }

    #[test]
    fn clear_reports_the_number_removed() {
        let mut map = PrTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(map.clear(), 3);
        assert!(map.is_empty());
        assert_eq!(map.clear(), 0);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = PrTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
        let b = PrTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
        assert_eq!(a, b);

        let c = PrTreeMap::from([(1, "a"), (2, "b")]);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_output_is_a_map() {
        let map = PrTreeMap::from([(2, "b"), (1, "a")]);
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    }
}

// ─── Cursor semantics ────────────────────────────────────────────────────────

mod cursors {
    use pretty_assertions::assert_eq;
    use prtree::PrTreeMap;

    #[test]
    fn cursor_starts_at_the_first_entry() {
        let map = PrTreeMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
        let cur = map.cursor();
        assert!(cur.is_valid());
        assert_eq!(cur.key_value(), Some((&1, &'a')));
    }

    #[test]
    fn cursor_on_an_empty_map_is_off_end() {
        let map: PrTreeMap<i32, ()> = PrTreeMap::new();
        let mut cur = map.cursor();
        assert!(!cur.is_valid());
        assert_eq!(cur.key(), None);
        assert!(!cur.move_next());
        assert!(!cur.move_prev());
    }

    #[test]
    fn stepping_past_the_end_restarts_from_the_front() {
        let map = PrTreeMap::from([(1, ()), (2, ()), (3, ())]);
        let mut cur = map.cursor();

        assert!(cur.move_next_n(2));
        assert_eq!(cur.key(), Some(&3));

        // Off the end...
        assert!(!cur.move_next());
        assert!(!cur.is_valid());

        // ...and the next step re-anchors at the first entry.
        assert!(cur.move_next());
        assert_eq!(cur.key(), Some(&1));
    }

    #[test]
    fn stepping_past_the_front_restarts_from_the_back() {
        let map = PrTreeMap::from([(1, ()), (2, ())]);
        let mut cur = map.cursor();

        assert!(!cur.move_prev_n(2));
        assert!(!cur.is_valid());

        assert!(cur.move_prev());
        assert_eq!(cur.key(), Some(&2));
    }

    #[test]
    fn counted_steps_stop_early_when_exhausted() {
        let map = PrTreeMap::from([(1, ()), (2, ()), (3, ())]);
        let mut cur = map.cursor();

        // Ten steps from the first of three entries runs off the end.
        assert!(!cur.move_next_n(10));
        assert!(!cur.is_valid());

        // Counted stepping from off-end re-anchors first: first + 1 = 2.
        assert!(cur.move_next_n(2));
        assert_eq!(cur.key(), Some(&2));
    }

    #[test]
    fn seek_positions_exactly_or_goes_off_end() {
        let map = PrTreeMap::from([(10, "x"), (20, "y")]);
        let mut cur = map.cursor();

        assert!(cur.seek(&20));
        assert_eq!(cur.key_value(), Some((&20, &"y")));

        // No nearest-match semantics: a miss goes off-end.
        assert!(!cur.seek(&15));
        assert!(!cur.is_valid());
    }

    #[test]
    fn first_last_and_invalidate() {
        let map = PrTreeMap::from([(1, ()), (2, ()), (3, ())]);
        let mut cur = map.cursor();

        assert!(cur.move_last());
        assert_eq!(cur.key(), Some(&3));
        assert!(cur.move_first());
        assert_eq!(cur.key(), Some(&1));

        cur.invalidate();
        assert!(!cur.is_valid());
        assert_eq!(cur.key_value(), None);
    }

    #[test]
    fn cursor_walks_the_full_sequence_both_ways() {
        let keys = [6, 2, 9, 1, 4, 8, 11, 3, 5, 7, 10];
        let mut map = PrTreeMap::new();
        for k in keys {
            map.insert(k, ());
        }

        let mut forward = Vec::new();
        let mut cur = map.cursor();
        while cur.is_valid() {
            forward.push(*cur.key().unwrap());
            cur.move_next();
        }
        assert_eq!(forward, (1..=11).collect::<Vec<_>>());

        let mut backward = Vec::new();
        assert!(cur.move_last());
        while cur.is_valid() {
            backward.push(*cur.key().unwrap());
            cur.move_prev();
        }
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn replace_value_swaps_in_place() {
        let mut map = PrTreeMap::from([(1, "one"), (2, "two")]);
        let mut cur = map.cursor_mut();

        assert!(cur.seek(&1));
        assert_eq!(cur.replace_value("ONE"), Ok("one"));
        assert_eq!(cur.value(), Some(&"ONE"));

        assert_eq!(map.get(&1), Some(&"ONE"));
        assert_eq!(map.get(&2), Some(&"two"));
        map.assert_invariants();
    }

    #[test]
    fn replace_value_off_end_returns_the_value() {
        let mut map: PrTreeMap<i32, &str> = PrTreeMap::new();
        let mut cur = map.cursor_mut();

        assert!(!cur.is_valid());
        let err = cur.replace_value("lost?").unwrap_err();
        assert_eq!(err.0, "lost?");
    }

    #[test]
    fn cursor_mut_edits_while_stepping() {
        let mut map = PrTreeMap::from([(1, 10), (2, 20), (3, 30)]);
        let mut cur = map.cursor_mut();

        while cur.is_valid() {
            if let Some(v) = cur.value_mut() {
                *v += 1;
            }
            cur.move_next();
        }

        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![11, 21, 31]);
    }
}

// ─── The pluggable-backend protocol ──────────────────────────────────────────

mod protocol {
    use pretty_assertions::assert_eq;
    use prtree::{InsertOutcome, OrderedMap, PrTreeMap};

    /// Exercises a backend purely through the dispatch surface, the way a
    /// host holding `Box<dyn OrderedMap>` would.
    fn exercise(map: &mut dyn OrderedMap<i32, String>) {
        assert_eq!(map.count(), 0);
        assert!(map.is_empty());

        assert_eq!(map.put(1, "one".into(), false), Ok(InsertOutcome::Inserted));
        assert_eq!(map.put(2, "two".into(), false), Ok(InsertOutcome::Inserted));

        // Duplicate without overwrite: rejected, pair handed back.
        assert_eq!(
            map.put(1, "uno".into(), false),
            Ok(InsertOutcome::Rejected(1, "uno".into()))
        );
        assert_eq!(map.search(&1).map(String::as_str), Some("one"));

        // Duplicate with overwrite: replaced, old value handed back.
        assert_eq!(
            map.put(1, "uno".into(), true),
            Ok(InsertOutcome::Replaced("one".into()))
        );
        assert_eq!(map.search(&1).map(String::as_str), Some("uno"));

        // Probe misses insert, probe hits leave the value alone.
        let (value, inserted) = map.probe(3, "three".into()).unwrap();
        assert!(inserted);
        assert_eq!(value.as_str(), "three");
        let (value, inserted) = map.probe(3, "tres".into()).unwrap();
        assert!(!inserted);
        assert_eq!(value.as_str(), "three");

        assert_eq!(map.count(), 3);

        // Ordered traversal through the protocol.
        let mut keys = Vec::new();
        let visited = map.walk(&mut |&k, _| {
            keys.push(k);
            true
        });
        assert_eq!(visited, 3);
        assert_eq!(keys, vec![1, 2, 3]);

        let entries: Vec<_> = map.entries().map(|(&k, v)| (k, v.clone())).collect();
        assert_eq!(entries[0], (1, "uno".to_string()));

        assert_eq!(map.take(&2), Some((2, "two".into())));
        assert_eq!(map.take(&2), None);

        assert_eq!(map.drain(), 2);
        assert!(map.is_empty());
    }

    #[test]
    fn pr_tree_backend_conforms() {
        let mut map: PrTreeMap<i32, String> = PrTreeMap::new();
        exercise(&mut map);
        map.assert_invariants();
    }

    #[test]
    fn protocol_objects_are_boxable() {
        let mut boxed: Box<dyn OrderedMap<i32, String>> = Box::new(PrTreeMap::new());
        exercise(boxed.as_mut());
    }
}
