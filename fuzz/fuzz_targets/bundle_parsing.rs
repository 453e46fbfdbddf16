// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bundle parsing under adversarial input.
//!
//! Truncated headers, section lengths that overflow the file, CRCs that lie
//! about the data they protect. Every path through `from_bytes` must end in
//! Ok or Err.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexidawg::{AnalyzerConfig, Bundle, MorphAnalyzer};

fuzz_target!(|data: &[u8]| {
    let Ok(bundle) = Bundle::from_bytes(data) else {
        return;
    };

    // INVARIANT 1: re-serializing gives a bundle with identical sections
    let reparsed = Bundle::from_bytes(&bundle.to_bytes().expect("writes into a Vec")).expect("own output must parse");
    assert_eq!(reparsed, bundle);

    // INVARIANT 2: loading its sections never panics
    if let Ok(analyzer) = MorphAnalyzer::from_bundle(&bundle, &AnalyzerConfig::default()) {
        let _ = analyzer.tag("тест");
    }
});
