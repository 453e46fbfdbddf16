// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-form → (lemma, tag) analysis.
//!
//! The words DAWG maps each form to `(paradigm_id, slot)` records. The lemma
//! is rebuilt by swapping the form's suffix for the paradigm's slot-0
//! suffix:
//!
//! ```text
//!   form  = "коти"      slot suffix  = "оти"   tag = "noun:p:v_naz"
//!   stem  = "к"         lemma suffix = "іт"
//!   lemma = "к" + "іт" = "кіт"
//! ```
//!
//! `tag()` is total: digits get the numeral tag, and a word with no records
//! gets a single unknown-tag interpretation with itself as lemma.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::paradigm::ParadigmTable;
use super::payload::WordPayload;
use crate::binary::{self, Bundle, BundleFlags};
use crate::config::{AnalyzerConfig, DictConfig};
use crate::dawg::{BytesDawg, CompletionDawg, ObjectDawg};
use crate::error::{DictError, Result};

/// One reading of a word-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MorphInterp {
    pub lemma: String,
    pub tag: String,
}

impl MorphInterp {
    pub fn new(lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }
}

#[derive(Debug)]
struct Tables {
    words: ObjectDawg<WordPayload>,
    paradigms: ParadigmTable,
    suffixes: Vec<String>,
    tags: Vec<String>,
    numeral_tag: String,
    unknown_tag: String,
}

/// Morphological analyzer over an immutable, shared dictionary.
///
/// Cloning shares the tables. Every query is a read-only walk, so one
/// analyzer can serve any number of threads.
#[derive(Debug, Clone)]
pub struct MorphAnalyzer {
    tables: Arc<Tables>,
}

impl MorphAnalyzer {
    /// Assemble an analyzer from decoded parts.
    ///
    /// Paradigm ids are validated against the string tables here, so lookups
    /// never index out of range.
    pub fn new(
        words: CompletionDawg,
        paradigms: ParadigmTable,
        suffixes: Vec<String>,
        tags: Vec<String>,
        config: &AnalyzerConfig,
    ) -> Result<Self> {
        paradigms.validate(suffixes.len(), tags.len())?;

        info!(
            units = words.dictionary().len(),
            paradigms = paradigms.len(),
            suffixes = suffixes.len(),
            tags = tags.len(),
            "morph analyzer loaded"
        );

        Ok(Self {
            tables: Arc::new(Tables {
                words: ObjectDawg::new(BytesDawg::with_config(words, &config.dict)),
                paradigms,
                suffixes,
                tags,
                numeral_tag: config.numeral_tag.clone(),
                unknown_tag: config.unknown_tag.clone(),
            }),
        })
    }

    /// Decode all four assets from memory.
    pub fn from_parts(
        dawg_bytes: &[u8],
        paradigm_bytes: &[u8],
        suffix_bytes: &[u8],
        tag_bytes: &[u8],
        config: &AnalyzerConfig,
    ) -> Result<Self> {
        Self::new(
            binary::decode_completion_dawg(dawg_bytes)?,
            ParadigmTable::decode(paradigm_bytes)?,
            binary::decode_string_table(suffix_bytes, "suffix")?,
            binary::decode_string_table(tag_bytes, "tag")?,
            config,
        )
    }

    /// Load a dictionary directory (`words.dawg`, `paradigms.bin`,
    /// `suffixes.json`, `tags.json`, or whatever `config.files` names).
    pub fn open_dir(dir: &Path, config: &AnalyzerConfig) -> Result<Self> {
        debug!(dir = %dir.display(), "loading dictionary directory");
        let files = &config.files;

        Self::from_parts(
            &binary::read_asset(&dir.join(&files.words))?,
            &binary::read_asset(&dir.join(&files.paradigms))?,
            &binary::read_asset(&dir.join(&files.suffixes))?,
            &binary::read_asset(&dir.join(&files.tags))?,
            config,
        )
    }

    /// Load from a decoded bundle. The bundle's flags decide the binascii
    /// workaround; the rest of `config` applies as given.
    pub fn from_bundle(bundle: &Bundle, config: &AnalyzerConfig) -> Result<Self> {
        let config = AnalyzerConfig {
            dict: DictConfig {
                binascii_workaround: bundle.flags.binascii_payloads(),
                ..config.dict.clone()
            },
            ..config.clone()
        };

        Self::from_parts(
            &bundle.dawg_bytes,
            &bundle.paradigm_bytes,
            &bundle.suffix_bytes,
            &bundle.tag_bytes,
            &config,
        )
    }

    /// Read and decode a bundle file.
    pub fn open_bundle(path: &Path, config: &AnalyzerConfig) -> Result<Self> {
        let bytes = binary::read_asset(path)?;
        Self::from_bundle(&Bundle::from_bytes(&bytes)?, config)
    }

    /// Pack a dictionary directory into a single bundle.
    pub fn bundle_dir(dir: &Path, config: &AnalyzerConfig) -> Result<Bundle> {
        let files = &config.files;
        let flags = if config.dict.binascii_workaround {
            BundleFlags::new().with_binascii_payloads()
        } else {
            BundleFlags::new()
        };

        Ok(Bundle {
            flags,
            dawg_bytes: binary::read_asset(&dir.join(&files.words))?,
            paradigm_bytes: binary::read_asset(&dir.join(&files.paradigms))?,
            suffix_bytes: binary::read_asset(&dir.join(&files.suffixes))?,
            tag_bytes: binary::read_asset(&dir.join(&files.tags))?,
        })
    }

    pub fn numeral_tag(&self) -> &str {
        &self.tables.numeral_tag
    }

    pub fn unknown_tag(&self) -> &str {
        &self.tables.unknown_tag
    }

    pub fn paradigms(&self) -> &ParadigmTable {
        &self.tables.paradigms
    }

    pub fn words(&self) -> &ObjectDawg<WordPayload> {
        &self.tables.words
    }

    /// Cheap existence check, as-is or lowercased. Decodes nothing.
    pub fn dict_has(&self, form: &str) -> bool {
        let words = &self.tables.words;
        words.has(form) || words.has(&form.to_lowercase())
    }

    /// Every reading of `form`. Never empty.
    ///
    /// 1. All-digit forms → `{form, numeral_tag}`.
    /// 2. Records for `form`, plus its lowercase if different.
    /// 3. Nothing found → `{form, unknown_tag}`.
    ///
    /// Duplicate `(lemma, tag)` pairs are collapsed, first one wins.
    pub fn tag(&self, form: &str) -> Result<Vec<MorphInterp>> {
        if is_numeral(form) {
            return Ok(vec![MorphInterp::new(form, self.numeral_tag())]);
        }

        let lowercase = form.to_lowercase();
        let mut variants = vec![form];
        if lowercase != form {
            variants.push(&lowercase);
        }

        let interps = self.lookup_variants(variants)?;
        if interps.is_empty() {
            return Ok(vec![MorphInterp::new(form, self.unknown_tag())]);
        }
        Ok(interps)
    }

    /// Readings of exactly `word`, no case folding and no fallbacks.
    pub fn lookup(&self, word: &str) -> Result<Vec<MorphInterp>> {
        self.tables
            .words
            .iter(word)
            .map(|payload| self.interpret(word, payload?))
            .collect()
    }

    /// Union of [`lookup`](Self::lookup) over several spellings, deduplicated.
    pub fn lookup_variants<'a>(
        &self,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<MorphInterp>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for word in words {
            for interp in self.lookup(word)? {
                if seen.insert(interp.clone()) {
                    out.push(interp);
                }
            }
        }
        Ok(out)
    }

    /// Tag many forms. Output order matches input order.
    #[cfg(feature = "parallel")]
    pub fn tag_batch<S: AsRef<str> + Sync>(&self, forms: &[S]) -> Result<Vec<Vec<MorphInterp>>> {
        use rayon::prelude::*;

        forms.par_iter().map(|form| self.tag(form.as_ref())).collect()
    }

    /// Tag many forms. Output order matches input order.
    #[cfg(not(feature = "parallel"))]
    pub fn tag_batch<S: AsRef<str> + Sync>(&self, forms: &[S]) -> Result<Vec<Vec<MorphInterp>>> {
        forms.iter().map(|form| self.tag(form.as_ref())).collect()
    }

    fn interpret(&self, word: &str, payload: WordPayload) -> Result<MorphInterp> {
        let t = &*self.tables;
        let paradigm = t
            .paradigms
            .get(payload.paradigm_id)
            .ok_or(DictError::ParadigmOutOfRange {
                paradigm: payload.paradigm_id,
                count: t.paradigms.len(),
            })?;

        let slot = usize::from(payload.slot);
        let slot_err = || DictError::SlotOutOfRange {
            paradigm: payload.paradigm_id,
            slot: payload.slot,
            len: paradigm.len(),
        };
        let form_suffix = paradigm
            .suffix_id(slot)
            .and_then(|id| t.suffixes.get(usize::from(id)))
            .ok_or_else(slot_err)?;
        let tag = paradigm
            .tag_id(slot)
            .and_then(|id| t.tags.get(usize::from(id)))
            .ok_or_else(slot_err)?;
        let lemma_suffix = paradigm
            .suffix_id(0)
            .and_then(|id| t.suffixes.get(usize::from(id)))
            .ok_or_else(slot_err)?;

        let stem = word.strip_suffix(form_suffix.as_str()).unwrap_or_else(|| {
            debug!(word, suffix = %form_suffix, "form does not end with its paradigm suffix");
            word
        });

        Ok(MorphInterp {
            lemma: format!("{stem}{lemma_suffix}"),
            tag: tag.clone(),
        })
    }
}

/// `^\d+$` over ASCII digits.
fn is_numeral(form: &str) -> bool {
    !form.is_empty() && form.bytes().all(|b| b.is_ascii_digit())
}
