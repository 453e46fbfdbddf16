// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! DAWG file parsing under adversarial input.
//!
//! A `words.dawg` is just two length-prefixed arrays, which makes it easy to
//! lie about: unit counts near u32::MAX, guides that stop short, guide counts
//! that disagree with the units. None of it should crash.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexidawg::binary::{decode_completion_dawg, encode_completion_dawg};

fuzz_target!(|data: &[u8]| {
    let Ok(dawg) = decode_completion_dawg(data) else {
        return;
    };

    // INVARIANT 1: guide covers exactly the units
    assert_eq!(dawg.guide().len(), dawg.dictionary().len());

    // INVARIANT 2: re-encoding reproduces the consumed prefix of the input
    let mut buf = Vec::new();
    encode_completion_dawg(&dawg, &mut buf);
    assert_eq!(&data[..buf.len()], buf.as_slice());
});
