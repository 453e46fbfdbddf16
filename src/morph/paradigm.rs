// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Paradigm tables: shared inflection patterns.
//!
//! A paradigm is the list of (suffix, tag) pairs one lexeme inflects
//! through. Thousands of lemmas share each pattern, so the dictionary stores
//! every pattern once and each word-form only records which slot it fills.
//! Slot 0 is always the lemma.
//!
//! # Wire Format (`paradigms.bin`)
//!
//! ```text
//! repeated until EOF:
//!   n: u16                  (forms in this paradigm)
//!   suffix_ids: [u16; n]    (into suffixes.json)
//!   tag_ids:    [u16; n]    (into tags.json)
//!   prefix_ids: [u16; n]    (reserved)
//! ```
//!
//! All little-endian.

use crate::error::{DictError, Result};

/// One inflection pattern. The three id arrays always have equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paradigm {
    /// `[suffix]×n, [tag]×n, [prefix]×n`, as on disk.
    ids: Vec<u16>,
}

impl Paradigm {
    pub fn new(suffix_ids: &[u16], tag_ids: &[u16], prefix_ids: &[u16]) -> Option<Self> {
        let n = suffix_ids.len();
        if tag_ids.len() != n || prefix_ids.len() != n {
            return None;
        }
        let mut ids = Vec::with_capacity(n * 3);
        ids.extend_from_slice(suffix_ids);
        ids.extend_from_slice(tag_ids);
        ids.extend_from_slice(prefix_ids);
        Some(Self { ids })
    }

    /// Number of forms.
    pub fn len(&self) -> usize {
        self.ids.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn suffix_id(&self, slot: usize) -> Option<u16> {
        self.suffix_ids().get(slot).copied()
    }

    pub fn tag_id(&self, slot: usize) -> Option<u16> {
        self.tag_ids().get(slot).copied()
    }

    pub fn prefix_id(&self, slot: usize) -> Option<u16> {
        self.prefix_ids().get(slot).copied()
    }

    pub fn suffix_ids(&self) -> &[u16] {
        &self.ids[..self.len()]
    }

    pub fn tag_ids(&self) -> &[u16] {
        &self.ids[self.len()..self.len() * 2]
    }

    pub fn prefix_ids(&self) -> &[u16] {
        &self.ids[self.len() * 2..]
    }
}

/// Every paradigm in the dictionary, indexed by paradigm id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParadigmTable {
    paradigms: Vec<Paradigm>,
}

impl ParadigmTable {
    pub fn new(paradigms: Vec<Paradigm>) -> Self {
        Self { paradigms }
    }

    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }

    pub fn get(&self, id: u16) -> Option<&Paradigm> {
        self.paradigms.get(usize::from(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Paradigm> {
        self.paradigms.iter()
    }

    /// Parse `paradigms.bin`. A record cut short is an error, not a partial table.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut paradigms = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let count_bytes = bytes
                .get(pos..pos + 2)
                .ok_or_else(|| DictError::truncated("paradigm header", pos + 2, bytes.len()))?;
            let n = usize::from(u16::from_le_bytes([count_bytes[0], count_bytes[1]]));
            pos += 2;

            let end = pos + n * 3 * 2;
            let body = bytes
                .get(pos..end)
                .ok_or_else(|| DictError::truncated("paradigm body", end, bytes.len()))?;
            let ids = body
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect();
            paradigms.push(Paradigm { ids });
            pos = end;
        }

        Ok(Self { paradigms })
    }

    /// Serialize in the `paradigms.bin` layout.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        for paradigm in &self.paradigms {
            buf.extend_from_slice(&(paradigm.len() as u16).to_le_bytes());
            for id in &paradigm.ids {
                buf.extend_from_slice(&id.to_le_bytes());
            }
        }
    }

    /// Check every suffix and tag id against the string table sizes.
    ///
    /// Prefix ids are reserved and not checked.
    pub fn validate(&self, suffix_count: usize, tag_count: usize) -> Result<()> {
        for paradigm in &self.paradigms {
            let checks = [
                ("suffix", paradigm.suffix_ids(), suffix_count),
                ("tag", paradigm.tag_ids(), tag_count),
            ];
            for (table, ids, len) in checks {
                if let Some(&index) = ids.iter().find(|&&id| usize::from(id) >= len) {
                    return Err(DictError::TableIndexOutOfRange { table, index, len });
                }
            }
        }
        Ok(())
    }
}
