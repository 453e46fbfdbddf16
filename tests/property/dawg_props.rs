//! Membership properties of the double-array automaton.
//!
//! - Every inserted key is found
//! - Every key absent from the oracle is rejected
//! - Values come back exactly as stored
//! - Encoding and decoding the DAWG file changes nothing observable

use std::collections::{BTreeMap, BTreeSet};

use lexidawg::binary::{decode_completion_dawg, encode_completion_dawg};
use lexidawg::dawg::ROOT;
use lexidawg::testing::DawgBuilder;
use proptest::prelude::*;

use super::common::build_completion_dawg;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Short keys over a small alphabet so prefixes collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abc]{0,6}").unwrap()
}

/// Mixed ASCII and Cyrillic keys (multi-byte labels).
fn unicode_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[aкоіт]{1,5}").unwrap()
}

fn key_set_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(key_strategy(), 0..40)
}

// ============================================================================
// MEMBERSHIP
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: has(k) iff k was inserted.
    #[test]
    fn prop_membership_matches_oracle(keys in key_set_strategy(), probes in prop::collection::vec(key_strategy(), 0..20)) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));

        for key in &keys {
            prop_assert!(dawg.has(key.as_bytes()), "inserted key {key:?} missing");
        }
        for probe in &probes {
            prop_assert_eq!(dawg.has(probe.as_bytes()), keys.contains(probe));
        }
    }

    /// Property: multi-byte keys behave like any other byte strings.
    #[test]
    fn prop_unicode_membership(keys in prop::collection::btree_set(unicode_key_strategy(), 1..30)) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));

        for key in &keys {
            prop_assert!(dawg.has(key.as_bytes()));
            // Any strict byte prefix that isn't itself a key is rejected
            let bytes = key.as_bytes();
            for cut in 1..bytes.len() {
                let prefix = &bytes[..cut];
                let is_key = keys.iter().any(|k| k.as_bytes() == prefix);
                prop_assert_eq!(dawg.has(prefix), is_key);
            }
        }
    }

    /// Property: values stored at leaves come back unchanged.
    #[test]
    fn prop_values_roundtrip(entries in prop::collection::btree_map(key_strategy(), 0u32..0x7FFF_FFFF, 0..30)) {
        let mut builder = DawgBuilder::new();
        for (key, &value) in &entries {
            builder.insert(key.as_bytes(), value).unwrap();
        }
        let (dictionary, _) = builder.build().unwrap();

        for (key, &value) in &entries {
            let state = dictionary.follow_bytes(key.as_bytes(), ROOT).unwrap();
            prop_assert_eq!(dictionary.value(state), Some(value));
        }
    }

    /// Property: following a path byte by byte equals following it at once.
    #[test]
    fn prop_follow_bytes_is_a_fold(keys in key_set_strategy(), probe in key_strategy()) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let dictionary = dawg.dictionary();

        let mut state = Some(ROOT);
        for &byte in probe.as_bytes() {
            state = state.and_then(|s| dictionary.follow_byte(s, byte));
        }
        prop_assert_eq!(state, dictionary.follow_bytes(probe.as_bytes(), ROOT));
    }

    /// Property: the DAWG file round trip preserves membership.
    #[test]
    fn prop_file_roundtrip(keys in key_set_strategy(), probes in prop::collection::vec(key_strategy(), 0..20)) {
        let dawg = build_completion_dawg(keys.iter().map(String::as_str));
        let mut buf = Vec::new();
        encode_completion_dawg(&dawg, &mut buf);
        let decoded = decode_completion_dawg(&buf).unwrap();

        for probe in keys.iter().chain(&probes) {
            prop_assert_eq!(decoded.has(probe.as_bytes()), dawg.has(probe.as_bytes()));
        }
    }
}

#[test]
fn test_values_with_shared_prefixes() {
    let entries: BTreeMap<&str, u32> = [("a", 1), ("ab", 2), ("abc", 3), ("b", 4)].into();
    let mut builder = DawgBuilder::new();
    for (key, &value) in &entries {
        builder.insert(key.as_bytes(), value).unwrap();
    }
    let (dictionary, _) = builder.build().unwrap();

    for (key, &value) in &entries {
        let state = dictionary.follow_bytes(key.as_bytes(), ROOT).unwrap();
        assert_eq!(dictionary.value(state), Some(value), "key {key}");
    }
}
