//! Completion walk properties.
//!
//! The guide-driven DFS must enumerate exactly the keys under a prefix, in
//! byte-lexicographic order, each once.

use std::collections::BTreeSet;

use lexidawg::Result;
use proptest::prelude::*;

use super::common::{build_completion_dawg, oracle_completions};

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{0,7}").unwrap()
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{0,3}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: completions(p) equals the sorted oracle set.
    #[test]
    fn prop_completions_match_oracle(
        keys in prop::collection::btree_set(key_strategy(), 0..50),
        prefix in prefix_strategy(),
    ) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let got: Vec<Vec<u8>> = dawg
            .completions(prefix.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        prop_assert_eq!(got, oracle_completions(&keys, &prefix));
    }

    /// Property: the empty prefix lists the whole key set.
    #[test]
    fn prop_empty_prefix_lists_everything(keys in prop::collection::btree_set(key_strategy(), 0..50)) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let all: Vec<String> = dawg
            .completion_strings(b"")
            .collect::<Result<_>>()
            .unwrap();

        prop_assert_eq!(all, keys.iter().cloned().collect::<Vec<_>>());
    }

    /// Property: has_completions(p) iff some key starts with p.
    #[test]
    fn prop_has_completions(
        keys in prop::collection::btree_set(key_strategy(), 0..30),
        prefix in prefix_strategy(),
    ) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let expected = keys.iter().any(|k| k.starts_with(prefix.as_str()));
        prop_assert_eq!(dawg.has_completions(prefix.as_bytes()), expected);
    }

    /// Property: prefix + completion is always a stored key.
    #[test]
    fn prop_completion_reconstructs_key(
        keys in prop::collection::btree_set(key_strategy(), 1..30),
        prefix in prefix_strategy(),
    ) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        for completion in dawg.completions(prefix.as_bytes()) {
            let mut key = prefix.as_bytes().to_vec();
            key.extend_from_slice(&completion.unwrap());
            prop_assert!(dawg.has(&key));
        }
    }

    /// Property: walks are independent; interleaving two iterators
    /// doesn't change either one's output.
    #[test]
    fn prop_iterators_are_independent(keys in prop::collection::btree_set(key_strategy(), 0..30)) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let mut first = dawg.completions(b"");
        let mut second = dawg.completions(b"");

        let mut a = Vec::new();
        let mut b = Vec::new();
        loop {
            let x = first.next();
            let y = second.next();
            if x.is_none() && y.is_none() {
                break;
            }
            if let Some(x) = x {
                a.push(x.unwrap());
            }
            if let Some(y) = y {
                b.push(y.unwrap());
            }
        }
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_completions_of_nested_keys() {
    let keys: BTreeSet<String> = ["a", "aa", "aaa", "ab", "b"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let dawg = build_completion_dawg(keys.iter().map(String::as_str));

    let got: Vec<String> = dawg.completion_strings(b"a").collect::<Result<_>>().unwrap();
    assert_eq!(got, vec!["", "a", "aa", "b"]);
}
