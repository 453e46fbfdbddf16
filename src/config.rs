// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loader and analyzer configuration.
//!
//! Defaults match dictionaries compiled with the Python `dawg` package's
//! `RecordDAWG('>HH', ...)`: separator `0x01`, and the binascii newline
//! baked into every payload key.
//!
//! ```json
//! {
//!   "dict": { "payload_separator": 1, "binascii_workaround": true },
//!   "numeral_tag": "numr:digit",
//!   "unknown_tag": "x",
//!   "files": { "words": "words.dawg" }
//! }
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{DictError, Result};

/// Default payload separator byte.
pub const PAYLOAD_SEPARATOR: u8 = 0x01;

/// Default tag for all-digit tokens.
pub const NUMERAL_TAG: &str = "numr:digit";

/// Default tag for words missing from the dictionary.
pub const UNKNOWN_TAG: &str = "x";

/// How payload keys are laid out inside the DAWG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictConfig {
    /// Byte separating a key from its base64 payload.
    pub payload_separator: u8,
    /// Strip one trailing byte from each payload before decoding.
    pub binascii_workaround: bool,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            payload_separator: PAYLOAD_SEPARATOR,
            binascii_workaround: true,
        }
    }
}

/// File names inside a dictionary directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictFiles {
    pub words: String,
    pub paradigms: String,
    pub suffixes: String,
    pub tags: String,
}

impl Default for DictFiles {
    fn default() -> Self {
        Self {
            words: "words.dawg".to_string(),
            paradigms: "paradigms.bin".to_string(),
            suffixes: "suffixes.json".to_string(),
            tags: "tags.json".to_string(),
        }
    }
}

/// Everything [`crate::MorphAnalyzer`] needs besides the asset bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub dict: DictConfig,
    pub numeral_tag: String,
    pub unknown_tag: String,
    pub files: DictFiles,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dict: DictConfig::default(),
            numeral_tag: NUMERAL_TAG.to_string(),
            unknown_tag: UNKNOWN_TAG.to_string(),
            files: DictFiles::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a JSON config, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DictError::Config)
    }

    pub fn with_numeral_tag(mut self, tag: impl Into<String>) -> Self {
        self.numeral_tag = tag.into();
        self
    }

    pub fn with_unknown_tag(mut self, tag: impl Into<String>) -> Self {
        self.unknown_tag = tag.into();
        self
    }

    pub fn with_binascii_workaround(mut self, enabled: bool) -> Self {
        self.dict.binascii_workaround = enabled;
        self
    }
}
