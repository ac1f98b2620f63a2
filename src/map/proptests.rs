//! Property-based tests for the map using proptest
//!
//! These tests replay arbitrary operation sequences against
//! `std::collections::HashMap` and verify that the map is observationally
//! identical at every step.

use super::ConcurrentMap;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, i32),
    Remove(u8),
    Get(u8),
    ContainsKey(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => any::<u8>().prop_map(MapOp::Remove),
        3 => any::<u8>().prop_map(MapOp::Get),
        1 => any::<u8>().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::Clear),
    ]
}

proptest! {
    /// Property: any operation sequence leaves the map observably equal to
    /// a plain HashMap driven by the same sequence.
    #[test]
    fn test_matches_model_hashmap(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let map: ConcurrentMap<u8, i32> = ConcurrentMap::new();
        let mut model: HashMap<u8, i32> = HashMap::new();

        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k).copied());
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(map.contains_key(&k), model.contains_key(&k));
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.is_empty(), model.is_empty());
        }

        let mut entries = map.entries();
        entries.sort();
        let mut expected: Vec<(u8, i32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(entries, expected);
    }

    /// Property: keys() and values() agree with entries() when the map is
    /// not being mutated.
    #[test]
    fn test_snapshots_agree_when_quiescent(
        inserts in prop::collection::vec((any::<u8>(), any::<i32>()), 0..100)
    ) {
        let map: ConcurrentMap<u8, i32> = ConcurrentMap::new();
        for (k, v) in inserts {
            map.insert(k, v);
        }

        let entries = map.entries();
        prop_assert_eq!(entries.len(), map.len());

        let mut keys = map.keys();
        keys.sort();
        let mut keys_from_entries: Vec<u8> = entries.iter().map(|(k, _)| *k).collect();
        keys_from_entries.sort();
        prop_assert_eq!(keys, keys_from_entries);

        let mut values = map.values();
        values.sort();
        let mut values_from_entries: Vec<i32> = entries.iter().map(|(_, v)| *v).collect();
        values_from_entries.sort();
        prop_assert_eq!(values, values_from_entries);
    }

    /// Property: clear() always leaves an observably empty map, whatever
    /// came before it.
    #[test]
    fn test_clear_is_total(
        inserts in prop::collection::vec((any::<u8>(), any::<i32>()), 0..100)
    ) {
        let map: ConcurrentMap<u8, i32> = ConcurrentMap::new();
        let probe_keys: Vec<u8> = inserts.iter().map(|(k, _)| *k).collect();
        for (k, v) in inserts {
            map.insert(k, v);
        }

        map.clear();

        prop_assert_eq!(map.len(), 0);
        prop_assert!(map.is_empty());
        prop_assert!(map.keys().is_empty());
        for k in probe_keys {
            prop_assert_eq!(map.get(&k), None);
        }
    }
}
