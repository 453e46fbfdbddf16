// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Guide: per-state child and sibling labels.
//!
//! A double array can tell you whether a transition exists, but not which
//! transitions exist. Enumerating children would mean probing all 256
//! labels. The guide stores, for each state, the label of its first child
//! and the label of its next sibling, so completion becomes a plain
//! depth-first walk.
//!
//! Two bytes per state, `0` meaning "none". Label 0 is reserved for leaves,
//! so it can never be a real child or sibling.

use std::sync::Arc;

/// Child/sibling table parallel to the dictionary's unit table.
#[derive(Debug, Clone)]
pub struct Guide {
    /// Interleaved `(child, sibling)` pairs, one per state.
    units: Arc<[u8]>,
}

impl Guide {
    /// Wrap interleaved `(child, sibling)` bytes. An odd trailing byte is ignored.
    pub fn new(units: impl Into<Arc<[u8]>>) -> Self {
        Self {
            units: units.into(),
        }
    }

    /// Number of states covered.
    pub fn len(&self) -> usize {
        self.units.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw interleaved bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.units
    }

    /// First child label of `state`.
    #[inline]
    pub fn child(&self, state: u32) -> Option<u8> {
        self.get(state as usize * 2)
    }

    /// Next label to try at the same depth once `state`'s subtree is exhausted.
    #[inline]
    pub fn sibling(&self, state: u32) -> Option<u8> {
        self.get(state as usize * 2 + 1)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<u8> {
        self.units.get(index).copied().filter(|&label| label != 0)
    }
}
