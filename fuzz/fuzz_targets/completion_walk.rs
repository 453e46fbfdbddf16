// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Completion walks over arbitrary unit and guide tables.
//!
//! The walk trusts the guide to name real transitions. When it doesn't, we
//! want one `BrokenGuide` error, not an index panic or an unbounded stack.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lexidawg::{CompletionDawg, Dictionary, Guide};

#[derive(Debug, Arbitrary)]
struct Input {
    units: Vec<u32>,
    guide: Vec<u8>,
    prefix: Vec<u8>,
}

/// Walks are finite but a cyclic guide can still take a while to hit its limit
const WALK_LIMIT: usize = 1024;

fuzz_target!(|input: Input| {
    let dawg = CompletionDawg::new(Dictionary::new(input.units), Guide::new(input.guide));

    let _ = dawg.has(&input.prefix);
    let _ = dawg.has_completions(&input.prefix);

    let mut errors = 0;
    for completion in dawg.completions(&input.prefix).take(WALK_LIMIT) {
        if completion.is_err() {
            errors += 1;
        }
    }

    // INVARIANT: an error ends the walk
    assert!(errors <= 1);
});
