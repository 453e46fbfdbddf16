// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Base64 codec for payloads stored inside DAWG keys.
//!
//! The decoder accepts both the standard and URL-safe alphabets at once
//! (`+`/`-` are 62, `/`/`_` are 63), since payload-carrying DAWGs in the wild
//! were written with either. Trailing `=` padding is optional.
//!
//! # References
//!
//! - RFC 4648 §4 (standard alphabet) and §5 (URL and filename safe alphabet)

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::error::{DictError, Result};

/// Standard alphabet, padding optional, non-zero trailing bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Fold the URL-safe characters onto the standard alphabet.
fn to_standard(encoded: &[u8]) -> Cow<'_, [u8]> {
    if !encoded.iter().any(|&b| b == b'-' || b == b'_') {
        return Cow::Borrowed(encoded);
    }
    Cow::Owned(
        encoded
            .iter()
            .map(|&b| match b {
                b'-' => b'+',
                b'_' => b'/',
                other => other,
            })
            .collect(),
    )
}

/// Decode base64 text into raw bytes.
pub fn b64_decode(encoded: &[u8]) -> Result<Vec<u8>> {
    LENIENT.decode(to_standard(encoded)).map_err(|e| {
        DictError::InvalidPayload(format!(
            "{e} in {:?}",
            String::from_utf8_lossy(encoded)
        ))
    })
}

/// Encode raw bytes as padded standard base64.
pub fn b64_encode(data: &[u8]) -> Vec<u8> {
    STANDARD.encode(data).into_bytes()
}
