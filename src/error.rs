// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for dictionary loading and lookup.
//!
//! Absence is never an error here. A key that isn't in the automaton is
//! `false` or `None` or an empty iterator. Everything in [`DictError`] means
//! the asset itself is broken (truncated, inconsistent, corrupted) or the
//! file system failed us. Either way, retrying won't help.

use std::path::PathBuf;

/// Errors raised while loading or reading a dictionary asset.
#[derive(thiserror::Error, Debug)]
pub enum DictError {
    /// Reading an asset file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section ended before the bytes it declares.
    #[error("{section} truncated: need {needed} bytes, have {available}")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    /// Guide table length differs from the unit table length.
    #[error("guide has {guide} entries but dictionary has {units} units")]
    GuideMismatch { units: usize, guide: usize },

    /// A size field exceeds the configured safety limit.
    #[error("{section} size {size} exceeds limit {limit}")]
    TooLarge {
        section: &'static str,
        size: usize,
        limit: usize,
    },

    /// Bundle header magic bytes don't match.
    #[error("invalid bundle magic: {0:?}")]
    BadMagic([u8; 4]),

    /// Bundle was written by a format version we can't read.
    #[error("unsupported bundle version {0}")]
    UnsupportedVersion(u8),

    /// Bundle footer checksum disagrees with the content.
    #[error("checksum mismatch: footer says {expected:#010x}, content is {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Suffix or tag table is not a JSON array of strings.
    #[error("failed to parse {table} table: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The guide names a label that has no transition in the automaton.
    #[error("guide points to missing transition {label:#04x} from state {state}")]
    BrokenGuide { state: u32, label: u8 },

    /// Payload bytes could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A key can't be stored: it contains a reserved byte.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A completion was expected to be UTF-8 text.
    #[error("completion is not valid UTF-8")]
    InvalidUtf8,

    /// A word payload references a paradigm that doesn't exist.
    #[error("paradigm {paradigm} out of range ({count} paradigms)")]
    ParadigmOutOfRange { paradigm: u16, count: usize },

    /// A word payload references a slot past the end of its paradigm.
    #[error("slot {slot} out of range for paradigm {paradigm} ({len} forms)")]
    SlotOutOfRange { paradigm: u16, slot: u16, len: usize },

    /// A paradigm references a suffix or tag string that doesn't exist.
    #[error("{table} index {index} out of range ({len} entries)")]
    TableIndexOutOfRange {
        table: &'static str,
        index: u16,
        len: usize,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DictError>;

impl DictError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn truncated(section: &'static str, needed: usize, available: usize) -> Self {
        Self::Truncated {
            section,
            needed,
            available,
        }
    }
}
