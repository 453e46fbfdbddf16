// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The record stored under every word-form: which paradigm, which slot.

use crate::dawg::Payload;
use crate::error::{DictError, Result};

/// Points a word-form at one slot of one paradigm.
///
/// Encoded as two big-endian `u16`s, the `>HH` struct format the dictionary
/// compiler uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordPayload {
    pub paradigm_id: u16,
    pub slot: u16,
}

impl WordPayload {
    pub const SIZE: usize = 4;

    pub fn new(paradigm_id: u16, slot: u16) -> Self {
        Self { paradigm_id, slot }
    }

    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let [p0, p1] = self.paradigm_id.to_be_bytes();
        let [s0, s1] = self.slot.to_be_bytes();
        [p0, p1, s0, s1]
    }
}

impl Payload for WordPayload {
    fn from_payload(bytes: &[u8]) -> Result<Self> {
        match *bytes {
            [p0, p1, s0, s1] => Ok(Self {
                paradigm_id: u16::from_be_bytes([p0, p1]),
                slot: u16::from_be_bytes([s0, s1]),
            }),
            _ => Err(DictError::InvalidPayload(format!(
                "word payload must be {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            ))),
        }
    }
}
