// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Key → payload bytes, encoded as ordinary DAWG keys.
//!
//! Payloads aren't a separate section. Each `(key, payload)` pair is stored
//! as the single key `key ++ SEP ++ base64(payload)`, so looking up a key's
//! payloads is just completing `key ++ SEP`. Homonyms fall out for free:
//! several payloads under one key are several completions.
//!
//! SEP must never occur inside a key, otherwise `"ab" ++ SEP ++ ...` and
//! `"ab" ++ SEP ++ "x" ++ SEP ++ ...` become indistinguishable. UTF-8 text
//! never produces `0x01`, which is why it's the default.

use super::codec::b64_decode;
use super::CompletionDawg;
use crate::config::DictConfig;
use crate::error::Result;

/// A completion DAWG whose keys carry base64 payloads after a separator.
#[derive(Debug, Clone)]
pub struct BytesDawg {
    dawg: CompletionDawg,
    separator: u8,
    binascii_workaround: bool,
}

impl BytesDawg {
    /// `binascii_workaround` trims one trailing byte from every completion
    /// before decoding. Python's `binascii.b2a_base64` appends a newline to
    /// its output, and DAWGs compiled with it store that newline in every key.
    pub fn new(dawg: CompletionDawg, separator: u8, binascii_workaround: bool) -> Self {
        Self {
            dawg,
            separator,
            binascii_workaround,
        }
    }

    pub fn with_config(dawg: CompletionDawg, config: &DictConfig) -> Self {
        Self::new(dawg, config.payload_separator, config.binascii_workaround)
    }

    pub fn completion_dawg(&self) -> &CompletionDawg {
        &self.dawg
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }

    fn payload_prefix(&self, key: &[u8]) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(key.len() + 1);
        prefix.extend_from_slice(key);
        prefix.push(self.separator);
        prefix
    }

    /// True iff `key` has at least one payload.
    pub fn has(&self, key: &str) -> bool {
        self.has_bytes(key.as_bytes())
    }

    pub fn has_bytes(&self, key: &[u8]) -> bool {
        self.dawg.has_completions(&self.payload_prefix(key))
    }

    /// Decoded payloads of `key`, in guide order.
    pub fn payloads<'a>(&'a self, key: &[u8]) -> impl Iterator<Item = Result<Vec<u8>>> + 'a {
        let prefix = self.payload_prefix(key);
        let trim = self.binascii_workaround;

        self.dawg.completions(&prefix).map(move |completion| {
            let mut encoded = completion?;
            if trim {
                encoded.pop();
            }
            b64_decode(&encoded)
        })
    }
}
