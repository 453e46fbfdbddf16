//! Payload layer properties.
//!
//! - Every stored payload is recovered, with or without the binascii newline
//! - Payloads never leak across keys, even when one key prefixes another
//! - Base64 decoding inverts encoding for arbitrary bytes

use std::collections::{BTreeMap, BTreeSet};

use lexidawg::dawg::codec::{b64_decode, b64_encode};
use lexidawg::{ObjectDawg, Result};
use proptest::prelude::*;

use super::common::build_bytes_dawg;

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[xyкі]{1,4}").unwrap()
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..12)
}

fn pairs_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::vec((key_strategy(), payload_strategy()), 0..25)
}

fn oracle(pairs: &[(String, Vec<u8>)]) -> BTreeMap<String, BTreeSet<Vec<u8>>> {
    let mut map: BTreeMap<String, BTreeSet<Vec<u8>>> = BTreeMap::new();
    for (key, payload) in pairs {
        map.entry(key.clone()).or_default().insert(payload.clone());
    }
    map
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: payloads(k) is exactly the set stored under k.
    #[test]
    fn prop_payloads_match_oracle(pairs in pairs_strategy(), binascii in any::<bool>(), probe in key_strategy()) {
        let dawg = build_bytes_dawg(&pairs, binascii);
        let expected = oracle(&pairs);

        for (key, payloads) in &expected {
            let got: BTreeSet<Vec<u8>> = dawg
                .payloads(key.as_bytes())
                .collect::<Result<_>>()
                .unwrap();
            prop_assert_eq!(&got, payloads);
            prop_assert!(dawg.has(key));
        }

        prop_assert_eq!(dawg.has(&probe), expected.contains_key(&probe));
    }

    /// Property: ObjectDawg<Vec<u8>> sees the same records as BytesDawg.
    #[test]
    fn prop_object_dawg_agrees(pairs in pairs_strategy(), binascii in any::<bool>()) {
        let bytes = build_bytes_dawg(&pairs, binascii);
        let objects: ObjectDawg<Vec<u8>> = ObjectDawg::new(bytes.clone());

        for (key, _) in &pairs {
            let raw: Vec<Vec<u8>> = bytes.payloads(key.as_bytes()).collect::<Result<_>>().unwrap();
            prop_assert_eq!(objects.get(key).unwrap(), raw);
        }
    }

    /// Property: b64_decode(b64_encode(x)) == x.
    #[test]
    fn prop_base64_inverse(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = b64_encode(&data);
        prop_assert_eq!(encoded.len() % 4, 0);
        prop_assert_eq!(b64_decode(&encoded).unwrap(), data);
    }

    /// Property: the decoder never panics on arbitrary input.
    #[test]
    fn prop_base64_decode_total(data in prop::collection::vec(any::<u8>(), 0..32)) {
        let _ = b64_decode(&data);
    }
}

#[test]
fn test_prefix_keys_keep_their_own_payloads() {
    let pairs = vec![
        ("к".to_string(), vec![1]),
        ("кі".to_string(), vec![2]),
        ("кіт".to_string(), vec![3]),
    ];
    let dawg = build_bytes_dawg(&pairs, true);

    for (key, payload) in &pairs {
        let got: Vec<Vec<u8>> = dawg.payloads(key.as_bytes()).collect::<Result<_>>().unwrap();
        assert_eq!(&got, &vec![payload.clone()], "key {key}");
    }
}
