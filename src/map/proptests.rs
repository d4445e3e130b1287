//! Property-based tests for SyncMap using proptest
//!
//! Random operation sequences are applied to a `SyncMap` and to a plain
//! `HashMap` model; after every step the observable state must agree.

use super::*;
use crate::lock::{Exclusive, LockPolicy, ReadWrite};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum MapOp {
    Set(u8, i32),
    Get(u8),
    Pull(u8),
    Delete(u8),
    Empty,
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| MapOp::Set(k % 32, v)),
        2 => any::<u8>().prop_map(|k| MapOp::Get(k % 32)),
        2 => any::<u8>().prop_map(|k| MapOp::Pull(k % 32)),
        2 => any::<u8>().prop_map(|k| MapOp::Delete(k % 32)),
        1 => Just(MapOp::Empty),
    ]
}

fn run_against_model<P: LockPolicy>(ops: &[MapOp]) -> Result<(), TestCaseError> {
    let map: SyncMap<u8, i32, P> = SyncMap::default();
    let mut model: HashMap<u8, i32> = HashMap::new();

    for op in ops {
        match *op {
            MapOp::Set(k, v) => {
                map.set(k, v);
                model.insert(k, v);
            }
            MapOp::Get(k) => {
                prop_assert_eq!(map.get(&k), model.get(&k).copied());
            }
            MapOp::Pull(k) => {
                prop_assert_eq!(map.pull(&k), model.remove(&k));
                prop_assert_eq!(map.get(&k), None);
            }
            MapOp::Delete(k) => {
                map.delete(&k);
                model.remove(&k);
            }
            MapOp::Empty => {
                map.empty();
                model.clear();
                prop_assert_eq!(map.len(), 0);
            }
        }
        prop_assert_eq!(map.len(), model.len());
    }

    let (keys, values) = map.items();
    prop_assert_eq!(keys.len(), values.len());
    let rebuilt: HashMap<u8, i32> = keys.into_iter().zip(values).collect();
    prop_assert_eq!(rebuilt, model);

    Ok(())
}

proptest! {
    #[test]
    fn test_matches_model_read_write(ops in prop::collection::vec(map_op(), 0..200)) {
        run_against_model::<ReadWrite>(&ops)?;
    }

    #[test]
    fn test_matches_model_exclusive(ops in prop::collection::vec(map_op(), 0..200)) {
        run_against_model::<Exclusive>(&ops)?;
    }

    #[test]
    fn test_keys_and_values_agree_with_items(
        entries in prop::collection::hash_map(any::<u16>(), any::<u32>(), 0..64)
    ) {
        let map: SyncMap<u16, u32> = SyncMap::from(entries.clone());

        let mut keys = map.keys();
        let mut values = map.values();
        keys.sort_unstable();
        values.sort_unstable();

        let mut expected_keys: Vec<_> = entries.keys().copied().collect();
        let mut expected_values: Vec<_> = entries.values().copied().collect();
        expected_keys.sort_unstable();
        expected_values.sort_unstable();

        prop_assert_eq!(keys, expected_keys);
        prop_assert_eq!(values, expected_values);
    }
}
