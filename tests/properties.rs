use proptest::prelude::*;
use radix_map::{visitor::WellFormedChecker, RadixMap};
use std::collections::BTreeMap;

/// Keys drawn mostly from a 4-byte alphabet so that prefix sharing, edge
/// splitting, and merging all get exercised constantly.
fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        4 => prop::collection::vec(0u8..4, 1..10),
        1 => prop::collection::vec(any::<u8>(), 1..10),
    ]
}

fn entries_strategy() -> impl Strategy<Value = BTreeMap<Vec<u8>, u32>> {
    prop::collection::btree_map(key_strategy(), any::<u32>(), 0..48)
}

fn entries_and_subset() -> impl Strategy<Value = (BTreeMap<Vec<u8>, u32>, Vec<Vec<u8>>)> {
    entries_strategy().prop_flat_map(|entries| {
        let keys: Vec<Vec<u8>> = entries.keys().cloned().collect();
        let len = keys.len();
        (Just(entries), prop::sample::subsequence(keys, 0..=len))
    })
}

proptest! {
    #[test]
    fn round_trip_matches_oracle(entries in entries_strategy()) {
        let map: RadixMap<Vec<u8>, u32> = entries.clone().into_iter().collect();
        prop_assert_eq!(map.len(), entries.len());

        for (key, value) in &entries {
            prop_assert_eq!(map.get(key.as_slice()), Some(value));
        }

        // Iteration must agree with the oracle's sorted order exactly.
        let walked: Vec<(Vec<u8>, u32)> =
            map.iter().map(|(key, value)| (key.clone(), *value)).collect();
        let expected: Vec<(Vec<u8>, u32)> =
            entries.iter().map(|(key, value)| (key.clone(), *value)).collect();
        prop_assert_eq!(walked, expected);

        WellFormedChecker::check(&map).unwrap();
    }

    #[test]
    fn removal_matches_oracle((entries, to_remove) in entries_and_subset()) {
        let mut map: RadixMap<Vec<u8>, u32> = entries.clone().into_iter().collect();
        let mut oracle = entries;

        for key in &to_remove {
            prop_assert_eq!(map.remove(key.as_slice()), oracle.remove(key));
            WellFormedChecker::check(&map).unwrap();
        }

        prop_assert_eq!(map.len(), oracle.len());
        for (key, value) in &oracle {
            prop_assert_eq!(map.get(key.as_slice()), Some(value));
        }
        for key in &to_remove {
            prop_assert_eq!(map.get(key.as_slice()), None);
        }
    }

    #[test]
    fn remove_prefix_matches_oracle(
        (entries, prefix) in (entries_strategy(), key_strategy())
    ) {
        let mut map: RadixMap<Vec<u8>, u32> = entries.clone().into_iter().collect();
        let matching = entries.keys().filter(|key| key.starts_with(&prefix)).count();

        prop_assert_eq!(map.remove_prefix(prefix.as_slice()), matching);
        prop_assert_eq!(map.len(), entries.len() - matching);
        for key in entries.keys() {
            prop_assert_eq!(
                map.contains_key(key.as_slice()),
                !key.starts_with(&prefix)
            );
        }

        WellFormedChecker::check(&map).unwrap();
    }

    #[test]
    fn longest_prefix_matches_oracle(
        (entries, pattern) in (entries_strategy(), key_strategy())
    ) {
        let map: RadixMap<Vec<u8>, u32> = entries.clone().into_iter().collect();
        let expected = entries
            .iter()
            .filter(|(key, _)| pattern.starts_with(key))
            .max_by_key(|(key, _)| key.len());

        prop_assert_eq!(map.longest_prefix(pattern.as_slice()), expected);
    }

    #[test]
    fn retain_matches_oracle(entries in entries_strategy()) {
        let mut map: RadixMap<Vec<u8>, u32> = entries.clone().into_iter().collect();
        map.retain(|_, value| *value % 2 == 0);

        let oracle: BTreeMap<Vec<u8>, u32> = entries
            .into_iter()
            .filter(|(_, value)| value % 2 == 0)
            .collect();

        prop_assert_eq!(map.len(), oracle.len());
        let walked: Vec<(Vec<u8>, u32)> =
            map.iter().map(|(key, value)| (key.clone(), *value)).collect();
        let expected: Vec<(Vec<u8>, u32)> = oracle.into_iter().collect();
        prop_assert_eq!(walked, expected);

        WellFormedChecker::check(&map).unwrap();
    }

    #[test]
    fn interleaved_operations_stay_well_formed(
        ops in prop::collection::vec(
            (0u8..3, key_strategy(), any::<u32>()),
            1..64,
        )
    ) {
        let mut map: RadixMap<Vec<u8>, u32> = RadixMap::new();
        let mut oracle: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

        for (selector, key, value) in ops {
            match selector {
                0 => {
                    prop_assert_eq!(
                        map.insert(key.clone(), value),
                        oracle.insert(key, value)
                    );
                },
                1 => {
                    prop_assert_eq!(map.remove(key.as_slice()), oracle.remove(&key));
                },
                _ => {
                    let expected = oracle.keys().filter(|k| k.starts_with(&key)).count();
                    prop_assert_eq!(map.remove_prefix(key.as_slice()), expected);
                    oracle.retain(|k, _| !k.starts_with(&key));
                },
            }
            prop_assert_eq!(map.len(), oracle.len());
            WellFormedChecker::check(&map).unwrap();
        }
    }
}
