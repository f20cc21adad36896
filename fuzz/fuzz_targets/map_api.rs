#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary};
use radix_map::{visitor::WellFormedChecker, RadixMap};
use std::{collections::BTreeMap, ops::ControlFlow};

#[derive(Arbitrary, Debug)]
enum Action {
    Clear,
    ContainsKey(Box<[u8]>),
    GetKey(Box<[u8]>),
    CheckLen,
    CheckIter,
    Insert(Box<[u8]>),
    Remove(Box<[u8]>),
    RemovePrefix(Box<[u8]>),
    LongestPrefix(Box<[u8]>),
    WalkPrefix(Box<[u8]>),
    WalkPath(Box<[u8]>),
    RetainOdd,
    ToMap,
    Clone,
}

libfuzzer_sys::fuzz_target!(|actions: Vec<Action>| {
    let mut tree = RadixMap::<Box<[u8]>, u32>::new();
    let mut oracle = BTreeMap::<Box<[u8]>, u32>::new();
    let mut next_value = 0;

    for action in actions {
        match action {
            Action::Clear => {
                tree.clear();
                oracle.clear();
            },
            Action::ContainsKey(key) => {
                assert_eq!(
                    tree.contains_key(key.as_ref()),
                    oracle.contains_key(key.as_ref())
                );
            },
            Action::GetKey(key) => {
                assert_eq!(tree.get(key.as_ref()), oracle.get(key.as_ref()));
            },
            Action::CheckLen => {
                assert_eq!(tree.len(), oracle.len());
            },
            Action::CheckIter => {
                assert!(tree.iter().eq(oracle.iter()));
            },
            Action::Insert(key) => {
                if key.is_empty() {
                    // The tree silently rejects the empty key.
                    assert_eq!(tree.insert(key, next_value), None);
                } else {
                    assert_eq!(
                        tree.insert(key.clone(), next_value),
                        oracle.insert(key, next_value)
                    );
                }
                next_value += 1;
            },
            Action::Remove(key) => {
                assert_eq!(tree.remove(key.as_ref()), oracle.remove(key.as_ref()));
            },
            Action::RemovePrefix(prefix) => {
                let expected = oracle
                    .keys()
                    .filter(|key| key.starts_with(prefix.as_ref()))
                    .count();
                assert_eq!(tree.remove_prefix(prefix.as_ref()), expected);
                oracle.retain(|key, _| !key.starts_with(prefix.as_ref()));
            },
            Action::LongestPrefix(pattern) => {
                let expected = oracle
                    .iter()
                    .filter(|(key, _)| pattern.starts_with(key.as_ref()))
                    .max_by_key(|(key, _)| key.len());
                assert_eq!(tree.longest_prefix(pattern.as_ref()), expected);
            },
            Action::WalkPrefix(prefix) => {
                let mut walked = Vec::new();
                let _ = tree.walk_prefix(prefix.as_ref(), |key, value| {
                    walked.push((key.clone(), *value));
                    ControlFlow::Continue(())
                });
                let expected: Vec<(Box<[u8]>, u32)> = oracle
                    .iter()
                    .filter(|(key, _)| key.starts_with(prefix.as_ref()))
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(walked, expected);
            },
            Action::WalkPath(path) => {
                let mut walked = Vec::new();
                let _ = tree.walk_path(path.as_ref(), |key, value| {
                    walked.push((key.clone(), *value));
                    ControlFlow::Continue(())
                });
                let expected: Vec<(Box<[u8]>, u32)> = oracle
                    .iter()
                    .filter(|(key, _)| path.starts_with(key.as_ref()))
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(walked, expected);
            },
            Action::RetainOdd => {
                tree.retain(|_, value| *value % 2 == 1);
                oracle.retain(|_, value| *value % 2 == 1);
            },
            Action::ToMap => {
                let snapshot = tree.to_map();
                assert_eq!(snapshot.len(), oracle.len());
                for (key, value) in &snapshot {
                    assert_eq!(oracle.get(key), Some(value));
                }
            },
            Action::Clone => {
                let copied = tree.clone();
                assert_eq!(copied, tree);
                tree = copied;
            },
        }

        WellFormedChecker::check(&tree).expect("tree must stay well-formed");
    }
});
