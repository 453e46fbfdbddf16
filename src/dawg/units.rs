// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit layout of a 32-bit double-array unit.
//!
//! This is the `dawgdic` layout, the same one darts-clone uses:
//!
//! ```text
//! 31        30 ........ 10   9          8          7 ...... 0
//! ┌─────────┬──────────────┬──────────┬──────────┬──────────┐
//! │ IS_LEAF │    offset    │ EXTENSION│ HAS_LEAF │  label   │
//! └─────────┴──────────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! A leaf unit (bit 31 set) stores a 31-bit value instead of the fields
//! above. Because `label()` keeps bit 31, a leaf can never be mistaken for
//! the target of an ordinary byte transition.
//!
//! Offsets up to 2^21 are stored directly. Larger offsets must be multiples
//! of 256; they're stored shifted right by 8 with the EXTENSION bit set.

/// Bit 31: unit is a leaf holding a value.
pub const IS_LEAF_BIT: u32 = 1 << 31;

/// Bit 8: some key terminates at this state.
pub const HAS_LEAF_BIT: u32 = 1 << 8;

/// Bit 9: stored offset is shifted left by 8.
pub const EXTENSION_BIT: u32 = 1 << 9;

/// First offset that no longer fits without the extension bit.
pub const OFFSET_MAX: u32 = 1 << 21;

/// Largest offset the extension encoding can carry.
pub const EXTENDED_OFFSET_MAX: u32 = 1 << 29;

#[inline]
pub fn has_leaf(unit: u32) -> bool {
    unit & HAS_LEAF_BIT != 0
}

#[inline]
pub fn value(unit: u32) -> u32 {
    unit & !IS_LEAF_BIT
}

#[inline]
pub fn label(unit: u32) -> u32 {
    unit & (IS_LEAF_BIT | 0xFF)
}

#[inline]
pub fn offset(unit: u32) -> u32 {
    (unit >> 10) << ((unit & EXTENSION_BIT) >> 6)
}

/// Pack an offset into its unit bits, or `None` if it can't be represented.
pub fn encode_offset(offset: u32) -> Option<u32> {
    if offset < OFFSET_MAX {
        Some(offset << 10)
    } else if offset < EXTENDED_OFFSET_MAX && offset & 0xFF == 0 {
        Some(((offset >> 8) << 10) | EXTENSION_BIT)
    } else {
        None
    }
}

/// Build a leaf unit carrying `value` (top bit is dropped).
#[inline]
pub fn leaf(value: u32) -> u32 {
    IS_LEAF_BIT | (value & !IS_LEAF_BIT)
}
