// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bundle header and footer structures.
//!
//! The header is 24 bytes of fixed-size fields, parsed in one read before
//! anything else. It gives the length of every section, so section offsets
//! follow by simple addition.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("GDXL", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the single source of truth for bundle layout. Both
//! the write path and the read path go through it.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::error::{DictError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "LXDG" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"LXDG";

/// Footer magic: "GDXL" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"GDXL";

/// Current bundle format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum asset size: 256 MB
pub const MAX_ASSET_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of double-array units (fits in MAX_ASSET_SIZE)
pub const MAX_UNIT_COUNT: usize = MAX_ASSET_SIZE / 4;

// ============================================================================
// FLAGS
// ============================================================================

/// Bundle flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleFlags(pub(crate) u8);

impl BundleFlags {
    /// Payload keys carry a trailing binascii newline.
    pub const BINASCII_PAYLOADS: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_binascii_payloads(mut self) -> Self {
        self.0 |= Self::BINASCII_PAYLOADS;
        self
    }

    pub fn binascii_payloads(self) -> bool {
        self.0 & Self::BINASCII_PAYLOADS != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Bundle header (24 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleHeader {
    pub version: u8,
    pub flags: BundleFlags,
    pub dawg_len: u32,
    pub paradigms_len: u32,
    pub suffixes_len: u32,
    pub tags_len: u32,
}

impl BundleHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 4*4 (u32s) = 24
    pub const SIZE: usize = 24;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version, self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.dawg_len.to_le_bytes())?;
        w.write_all(&self.paradigms_len.to_le_bytes())?;
        w.write_all(&self.suffixes_len.to_le_bytes())?;
        w.write_all(&self.tags_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> Result<Self> {
        let buf = bytes
            .get(..Self::SIZE)
            .ok_or_else(|| DictError::truncated("bundle header", Self::SIZE, bytes.len()))?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(DictError::BadMagic(magic));
        }

        let version = buf[4];
        if version != VERSION {
            return Err(DictError::UnsupportedVersion(version));
        }

        let u32_at =
            |pos: usize| u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]]);

        Ok(Self {
            version,
            flags: BundleFlags(buf[5]),
            // buf[6..8] is reserved
            dawg_len: u32_at(8),
            paradigms_len: u32_at(12),
            suffixes_len: u32_at(16),
            tags_len: u32_at(20),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl BundleFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Read the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(DictError::truncated("bundle footer", Self::SIZE, bytes.len()));
        }

        let footer_start = bytes.len() - Self::SIZE;
        let footer = &bytes[footer_start..];

        let magic = [footer[4], footer[5], footer[6], footer[7]];
        if magic != FOOTER_MAGIC {
            return Err(DictError::BadMagic(magic));
        }

        Ok(Self {
            crc32: u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges, computed from header lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub dawg: (usize, usize),
    pub paradigms: (usize, usize),
    pub suffixes: (usize, usize),
    pub tags: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    /// Layout order:
    /// 1. HEADER     [24B]
    /// 2. DAWG       [dawg_len]
    /// 3. PARADIGMS  [paradigms_len]
    /// 4. SUFFIXES   [suffixes_len] (JSON)
    /// 5. TAGS       [tags_len] (JSON)
    /// 6. FOOTER     [8B]
    pub fn from_header(h: &BundleHeader) -> Self {
        let mut pos = BundleHeader::SIZE;
        let mut next = |len: u32| {
            let start = pos;
            pos += len as usize;
            (start, pos)
        };

        let dawg = next(h.dawg_len);
        let paradigms = next(h.paradigms_len);
        let suffixes = next(h.suffixes_len);
        let tags = next(h.tags_len);
        let footer = next(BundleFooter::SIZE as u32);

        Self {
            dawg,
            paradigms,
            suffixes,
            tags,
            footer,
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}
