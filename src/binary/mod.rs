// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary asset formats: DAWG files, string tables, and the single-file bundle.
//!
//! # DAWG file (`words.dawg`)
//!
//! This is the layout the Python `dawg` package (and dawgdic) writes, so
//! existing dictionaries load as-is. Little-endian throughout.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ unit_count: u32                            │
//! │ units: [u32; unit_count]   (double array)  │
//! ├────────────────────────────────────────────┤
//! │ guide_count: u32  (== unit_count)          │
//! │ guide: [(child: u8, sibling: u8); count]   │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Bundle (`.lxd`)
//!
//! Everything a [`crate::MorphAnalyzer`] needs in one checksummed file:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ HEADER (24 bytes)                          │
//! │   magic: [u8; 4] = "LXDG"                  │
//! │   version: u8 = 1, flags: u8, reserved: 2  │
//! │   dawg_len, paradigms_len: u32             │
//! │   suffixes_len, tags_len: u32              │
//! ├────────────────────────────────────────────┤
//! │ 1. DAWG       (DAWG file, as above)        │
//! │ 2. PARADIGMS  (paradigms.bin)              │
//! │ 3. SUFFIXES   (JSON array of strings)      │
//! │ 4. TAGS       (JSON array of strings)      │
//! ├────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "GDXL"     │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Security Considerations
//!
//! Assets may come from anywhere, so every length is checked before it's
//! trusted:
//! - File and section sizes are validated against MAX_* constants
//! - Counts are bounds-checked with checked arithmetic
//! - The bundle's CRC32 footer detects corruption and truncation

mod header;

pub use header::{
    BundleFlags, BundleFooter, BundleHeader, SectionOffsets, FOOTER_MAGIC, MAGIC,
    MAX_ASSET_SIZE, MAX_UNIT_COUNT, VERSION,
};

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::dawg::{CompletionDawg, Dictionary, Guide};
use crate::error::{DictError, Result};

// ============================================================================
// FILE ACCESS
// ============================================================================

/// Read a whole asset file, refusing anything over [`MAX_ASSET_SIZE`].
pub fn read_asset(path: &Path) -> Result<Vec<u8>> {
    let size = fs::metadata(path)
        .map_err(|e| DictError::io(path, e))?
        .len() as usize;
    if size > MAX_ASSET_SIZE {
        return Err(DictError::TooLarge {
            section: "asset file",
            size,
            limit: MAX_ASSET_SIZE,
        });
    }

    fs::read(path).map_err(|e| DictError::io(path, e))
}

fn read_u32(bytes: &[u8], pos: usize, section: &'static str) -> Result<u32> {
    bytes
        .get(pos..pos + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| DictError::truncated(section, pos + 4, bytes.len()))
}

// ============================================================================
// DAWG ENCODING
// ============================================================================

/// Parse a DAWG file into a completion-capable automaton.
///
/// Fails if either section is truncated or the guide and unit counts
/// disagree. Bytes after the guide are ignored with a warning.
pub fn decode_completion_dawg(bytes: &[u8]) -> Result<CompletionDawg> {
    let unit_count = read_u32(bytes, 0, "dawg unit count")? as usize;
    if unit_count > MAX_UNIT_COUNT {
        return Err(DictError::TooLarge {
            section: "dawg units",
            size: unit_count,
            limit: MAX_UNIT_COUNT,
        });
    }

    let units_end = 4 + unit_count * 4;
    let unit_bytes = bytes
        .get(4..units_end)
        .ok_or_else(|| DictError::truncated("dawg units", units_end, bytes.len()))?;
    let units: Vec<u32> = unit_bytes
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    let guide_count = read_u32(bytes, units_end, "guide count")? as usize;
    if guide_count != unit_count {
        return Err(DictError::GuideMismatch {
            units: unit_count,
            guide: guide_count,
        });
    }

    let guide_start = units_end + 4;
    let guide_end = guide_start + guide_count * 2;
    let guide_bytes = bytes
        .get(guide_start..guide_end)
        .ok_or_else(|| DictError::truncated("guide", guide_end, bytes.len()))?;

    if bytes.len() > guide_end {
        warn!(
            trailing = bytes.len() - guide_end,
            "ignoring trailing bytes after dawg guide"
        );
    }
    debug!(units = unit_count, bytes = bytes.len(), "decoded dawg");

    Ok(CompletionDawg::new(
        Dictionary::new(units),
        Guide::new(guide_bytes.to_vec()),
    ))
}

/// Serialize an automaton in the DAWG file layout.
pub fn encode_completion_dawg(dawg: &CompletionDawg, buf: &mut Vec<u8>) {
    let units = dawg.dictionary().units();
    let guide = dawg.guide().as_bytes();

    buf.reserve(8 + units.len() * 4 + guide.len());
    buf.extend_from_slice(&(units.len() as u32).to_le_bytes());
    for unit in units {
        buf.extend_from_slice(&unit.to_le_bytes());
    }
    buf.extend_from_slice(&((guide.len() / 2) as u32).to_le_bytes());
    buf.extend_from_slice(&guide[..guide.len() / 2 * 2]);
}

/// Load a DAWG file from disk.
pub fn read_completion_dawg(path: &Path) -> Result<CompletionDawg> {
    decode_completion_dawg(&read_asset(path)?)
}

// ============================================================================
// STRING TABLES
// ============================================================================

/// Parse a JSON array of strings (suffix or tag table).
pub fn decode_string_table(bytes: &[u8], table: &'static str) -> Result<Vec<String>> {
    serde_json::from_slice(bytes).map_err(|source| DictError::Json { table, source })
}

/// Serialize a string table as JSON.
pub fn encode_string_table(strings: &[String], table: &'static str) -> Result<Vec<u8>> {
    serde_json::to_vec(strings).map_err(|source| DictError::Json { table, source })
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Raw sections of a single-file dictionary bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub flags: BundleFlags,
    pub dawg_bytes: Vec<u8>,
    pub paradigm_bytes: Vec<u8>,
    pub suffix_bytes: Vec<u8>,
    pub tag_bytes: Vec<u8>,
}

impl Bundle {
    fn header(&self) -> BundleHeader {
        BundleHeader {
            version: VERSION,
            flags: self.flags,
            dawg_len: self.dawg_bytes.len() as u32,
            paradigms_len: self.paradigm_bytes.len() as u32,
            suffixes_len: self.suffix_bytes.len() as u32,
            tags_len: self.tag_bytes.len() as u32,
        }
    }

    /// Serialize with header and CRC32 footer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let header = self.header();
        let mut buf = Vec::with_capacity(header.section_offsets().total_size());

        header.write(&mut buf)?;
        buf.extend_from_slice(&self.dawg_bytes);
        buf.extend_from_slice(&self.paradigm_bytes);
        buf.extend_from_slice(&self.suffix_bytes);
        buf.extend_from_slice(&self.tag_bytes);

        let footer = BundleFooter {
            crc32: BundleFooter::compute_crc32(&buf),
        };
        footer.write(&mut buf)?;
        Ok(buf)
    }

    /// Deserialize from bytes (with CRC32 validation)
    ///
    /// # Validation
    ///
    /// 1. Size is within MAX_ASSET_SIZE
    /// 2. Footer magic is valid ("GDXL") and CRC32 matches
    /// 3. Header magic is valid ("LXDG") and version supported
    /// 4. Section lengths add up to the content size exactly
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_ASSET_SIZE {
            return Err(DictError::TooLarge {
                section: "bundle",
                size: bytes.len(),
                limit: MAX_ASSET_SIZE,
            });
        }

        let min_size = BundleHeader::SIZE + BundleFooter::SIZE;
        if bytes.len() < min_size {
            return Err(DictError::truncated("bundle", min_size, bytes.len()));
        }

        let footer = BundleFooter::read(bytes)?;
        let content = &bytes[..bytes.len() - BundleFooter::SIZE];
        let actual = BundleFooter::compute_crc32(content);
        if footer.crc32 != actual {
            return Err(DictError::ChecksumMismatch {
                expected: footer.crc32,
                actual,
            });
        }

        let header = BundleHeader::read(bytes)?;
        let offsets = header.section_offsets();
        if offsets.content_size() != content.len() {
            return Err(DictError::truncated(
                "bundle sections",
                offsets.content_size(),
                content.len(),
            ));
        }

        let section = |range: (usize, usize), name: &'static str| -> Result<Vec<u8>> {
            offsets
                .slice(bytes, range)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| DictError::truncated(name, range.1, bytes.len()))
        };

        let bundle = Self {
            flags: header.flags,
            dawg_bytes: section(offsets.dawg, "bundle dawg")?,
            paradigm_bytes: section(offsets.paradigms, "bundle paradigms")?,
            suffix_bytes: section(offsets.suffixes, "bundle suffixes")?,
            tag_bytes: section(offsets.tags, "bundle tags")?,
        };
        debug!(
            bytes = bytes.len(),
            dawg = bundle.dawg_bytes.len(),
            paradigms = bundle.paradigm_bytes.len(),
            "decoded bundle"
        );

        Ok(bundle)
    }
}
