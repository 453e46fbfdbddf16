// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for analyzer queries.
//!
//! Any string is a valid query. `tag()` over a well-formed dictionary must
//! return Ok with at least one reading, whatever the input: control
//! characters, combining marks, mixed scripts, odd case mappings.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexidawg::testing::sample_analyzer;
use lexidawg::MorphAnalyzer;

fuzz_target!(|query: &str| {
    static ANALYZER: std::sync::OnceLock<MorphAnalyzer> = std::sync::OnceLock::new();
    let analyzer = ANALYZER.get_or_init(sample_analyzer);

    // INVARIANT 1: tag() is total
    let interps = analyzer.tag(query).expect("sample dictionary is well-formed");
    assert!(!interps.is_empty());

    // INVARIANT 2: no duplicate readings
    for (i, a) in interps.iter().enumerate() {
        assert!(!interps[i + 1..].contains(a), "duplicate reading {a:?}");
    }

    // INVARIANT 3: dict_has agrees with exact or lowercase lookup
    let found = !analyzer.lookup(query).unwrap().is_empty()
        || !analyzer.lookup(&query.to_lowercase()).unwrap().is_empty();
    assert_eq!(analyzer.dict_has(query), found);
});
