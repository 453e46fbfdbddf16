// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only double-array automaton.
//!
//! A state is just an index into the unit table. Following a byte is one XOR
//! and one label comparison: `next = state ^ offset(units[state]) ^ label`,
//! and the transition exists iff the unit at `next` carries that label. No
//! search, no branching on node shape. That's the whole reason to pay the
//! construction cost of a double array.

use std::sync::Arc;

use super::units;

/// Index of the root state.
pub const ROOT: u32 = 0;

/// Minimized trie over byte strings, stored as dawgdic double-array units.
///
/// Cloning is cheap: the unit table is shared.
#[derive(Debug, Clone)]
pub struct Dictionary {
    units: Arc<[u32]>,
}

impl Dictionary {
    pub fn new(units: impl Into<Arc<[u32]>>) -> Self {
        Self {
            units: units.into(),
        }
    }

    /// Root state, where every key starts.
    #[inline]
    pub fn root(&self) -> u32 {
        ROOT
    }

    /// Number of units (states plus leaf slots).
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Raw unit table.
    pub fn units(&self) -> &[u32] {
        &self.units
    }

    #[inline]
    fn unit(&self, state: u32) -> Option<u32> {
        self.units.get(state as usize).copied()
    }

    /// True iff some key terminates exactly at `state`.
    #[inline]
    pub fn has_value(&self, state: u32) -> bool {
        self.unit(state).is_some_and(units::has_leaf)
    }

    /// Value stored in the leaf attached to `state`, if a key ends here.
    pub fn value(&self, state: u32) -> Option<u32> {
        let unit = self.unit(state)?;
        if !units::has_leaf(unit) {
            return None;
        }
        self.unit(state ^ units::offset(unit)).map(units::value)
    }

    /// Single-byte transition. `None` means no key has this prefix.
    ///
    /// Out-of-range indices (possible only in corrupted assets) are treated
    /// the same as a missing transition.
    #[inline]
    pub fn follow_byte(&self, state: u32, label: u8) -> Option<u32> {
        let unit = self.unit(state)?;
        let next = state ^ units::offset(unit) ^ u32::from(label);
        let target = self.unit(next)?;
        (units::label(target) == u32::from(label)).then_some(next)
    }

    /// Fold [`follow_byte`](Self::follow_byte) over `bytes` starting at `state`.
    pub fn follow_bytes(&self, bytes: &[u8], state: u32) -> Option<u32> {
        bytes
            .iter()
            .try_fold(state, |state, &byte| self.follow_byte(state, byte))
    }

    /// Exact-key membership.
    pub fn has(&self, key: &[u8]) -> bool {
        self.follow_bytes(key, ROOT)
            .is_some_and(|state| self.has_value(state))
    }
}
