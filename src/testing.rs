// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation. Real
//! dictionaries are compiled offline by the Python toolchain; these builders
//! produce small but layout-identical assets so tests don't need fixtures
//! on disk.
//!
//! The double array built here is a plain trie, not a minimized DAWG. The
//! read path can't tell the difference.

#![doc(hidden)]

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fs;
use std::path::Path;

use crate::binary::{self, Bundle, BundleFlags};
use crate::config::{AnalyzerConfig, PAYLOAD_SEPARATOR};
use crate::dawg::codec::b64_encode;
use crate::dawg::units::{self, HAS_LEAF_BIT, IS_LEAF_BIT};
use crate::dawg::{BytesDawg, CompletionDawg, Dictionary, Guide, ROOT};
use crate::error::{DictError, Result};
use crate::morph::{MorphAnalyzer, Paradigm, ParadigmTable, WordPayload};

// ============================================================================
// DAWG BUILDER
// ============================================================================

/// Collects `(key, value)` pairs and lays them out as dawgdic units + guide.
#[derive(Debug, Default, Clone)]
pub struct DawgBuilder {
    keys: BTreeMap<Vec<u8>, u32>,
}

impl DawgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Add a key. Re-inserting a key replaces its value.
    ///
    /// Label 0 marks leaves, so keys can't contain NUL. Values keep 31 bits.
    pub fn insert(&mut self, key: &[u8], value: u32) -> Result<()> {
        if key.contains(&0) {
            return Err(DictError::InvalidKey(format!("{key:?} contains a NUL byte")));
        }
        if value & IS_LEAF_BIT != 0 {
            return Err(DictError::InvalidKey(format!(
                "value {value:#x} does not fit in 31 bits"
            )));
        }
        self.keys.insert(key.to_vec(), value);
        Ok(())
    }

    pub fn build(&self) -> Result<(Dictionary, Guide)> {
        let nodes = build_trie(&self.keys);
        let mut array = DoubleArray::default();
        array.mark(ROOT);

        // (trie node, unit index, incoming label)
        let mut queue = VecDeque::from([(0usize, ROOT, 0u8)]);
        while let Some((node_id, index, label)) = queue.pop_front() {
            let node = &nodes[node_id];
            let mut unit = u32::from(label);

            let mut labels = Vec::with_capacity(node.children.len() + 1);
            if node.value.is_some() {
                labels.push(0);
                unit |= HAS_LEAF_BIT;
            }
            labels.extend(node.children.keys().copied());

            if !labels.is_empty() {
                let (base, offset_bits) = array.find_base(index, &labels)?;
                unit |= offset_bits;
                array.bases.insert(base);
                for &l in &labels {
                    array.mark(base ^ u32::from(l));
                }
                if let Some(value) = node.value {
                    array.units[base as usize] = units::leaf(value);
                }

                let children: Vec<(u8, usize)> =
                    node.children.iter().map(|(&l, &c)| (l, c)).collect();
                if let Some(&(first, _)) = children.first() {
                    array.guide[index as usize * 2] = first;
                }
                for (k, &(l, child)) in children.iter().enumerate() {
                    let child_index = base ^ u32::from(l);
                    if let Some(&(next, _)) = children.get(k + 1) {
                        array.guide[child_index as usize * 2 + 1] = next;
                    }
                    queue.push_back((child, child_index, l));
                }
            }

            array.units[index as usize] = unit;
        }

        Ok((Dictionary::new(array.units), Guide::new(array.guide)))
    }

    pub fn build_completion_dawg(&self) -> Result<CompletionDawg> {
        let (dictionary, guide) = self.build()?;
        Ok(CompletionDawg::new(dictionary, guide))
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<u8, usize>,
    value: Option<u32>,
}

fn build_trie(keys: &BTreeMap<Vec<u8>, u32>) -> Vec<TrieNode> {
    let mut nodes = vec![TrieNode::default()];
    for (key, &value) in keys {
        let mut node = 0;
        for &byte in key {
            node = match nodes[node].children.get(&byte) {
                Some(&child) => child,
                None => {
                    let child = nodes.len();
                    nodes.push(TrieNode::default());
                    nodes[node].children.insert(byte, child);
                    child
                }
            };
        }
        nodes[node].value = Some(value);
    }
    nodes
}

/// Unit and guide tables under construction. Unused slots hold a bare
/// IS_LEAF bit, which no byte transition can match.
#[derive(Debug, Default)]
struct DoubleArray {
    units: Vec<u32>,
    guide: Vec<u8>,
    used: Vec<bool>,
    /// Unused slots below `used.len()`.
    holes: BTreeSet<u32>,
    /// Every base handed out so far. Unique bases mean a slot can only be
    /// reached from the one parent that placed it.
    bases: HashSet<u32>,
}

/// Holes tried before falling back to the end of the array.
const HOLE_ATTEMPTS: usize = 64;

impl DoubleArray {
    fn mark(&mut self, index: u32) {
        let len = self.used.len() as u32;
        if index >= len {
            self.holes.extend(len..index);
            let new_len = index as usize + 1;
            self.used.resize(new_len, false);
            self.units.resize(new_len, IS_LEAF_BIT);
            self.guide.resize(new_len * 2, 0);
        } else {
            self.holes.remove(&index);
        }
        self.used[index as usize] = true;
    }

    fn is_free(&self, index: u32) -> bool {
        !self.used.get(index as usize).copied().unwrap_or(false)
    }

    /// First base that puts every label on a free slot, with the offset bits
    /// for the parent unit.
    fn find_base(&self, index: u32, labels: &[u8]) -> Result<(u32, u32)> {
        let first = u32::from(labels[0]);
        let limit = units::EXTENDED_OFFSET_MAX;
        let candidates = self
            .holes
            .iter()
            .copied()
            .take(HOLE_ATTEMPTS)
            .chain(self.used.len() as u32..limit);

        for pos in candidates {
            let base = pos ^ first;
            let fits = base != ROOT
                && !self.bases.contains(&base)
                && labels.iter().all(|&l| self.is_free(base ^ u32::from(l)));
            if !fits {
                continue;
            }
            if let Some(bits) = units::encode_offset(index ^ base) {
                return Ok((base, bits));
            }
        }

        Err(DictError::TooLarge {
            section: "dawg units",
            size: limit as usize,
            limit: limit as usize,
        })
    }
}

// ============================================================================
// PAYLOAD DAWG BUILDER
// ============================================================================

/// Builds a [`BytesDawg`] the way `dawg.BytesDAWG` compiles one.
#[derive(Debug, Clone)]
pub struct PayloadDawgBuilder {
    inner: DawgBuilder,
    separator: u8,
    binascii: bool,
}

impl PayloadDawgBuilder {
    /// `binascii` appends the trailing newline Python's `b2a_base64` emits.
    pub fn new(binascii: bool) -> Self {
        Self {
            inner: DawgBuilder::new(),
            separator: PAYLOAD_SEPARATOR,
            binascii,
        }
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn insert(&mut self, key: &str, payload: &[u8]) -> Result<()> {
        if key.as_bytes().contains(&self.separator) {
            return Err(DictError::InvalidKey(format!(
                "{key:?} contains the payload separator {:#04x}",
                self.separator
            )));
        }

        let mut stored = Vec::with_capacity(key.len() + 1 + payload.len() * 2);
        stored.extend_from_slice(key.as_bytes());
        stored.push(self.separator);
        stored.extend_from_slice(&b64_encode(payload));
        if self.binascii {
            stored.push(b'\n');
        }
        self.inner.insert(&stored, 0)
    }

    pub fn build(&self) -> Result<BytesDawg> {
        Ok(BytesDawg::new(
            self.inner.build_completion_dawg()?,
            self.separator,
            self.binascii,
        ))
    }
}

// ============================================================================
// MORPHOLOGICAL DICTIONARY BUILDER
// ============================================================================

/// Assembles paradigms, string tables and the words DAWG for an analyzer.
#[derive(Debug, Clone, Default)]
pub struct MorphDictBuilder {
    pub config: AnalyzerConfig,
    suffixes: Vec<String>,
    tags: Vec<String>,
    paradigms: Vec<Paradigm>,
    forms: Vec<(String, WordPayload)>,
}

impl MorphDictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lexeme as `stem` plus `(suffix, tag)` per form. The first form
    /// is the lemma. Identical paradigms are shared. Returns the paradigm id.
    pub fn add_lexeme(&mut self, stem: &str, forms: &[(&str, &str)]) -> u16 {
        let suffix_ids: Vec<u16> = forms
            .iter()
            .map(|(suffix, _)| intern(&mut self.suffixes, suffix))
            .collect();
        let tag_ids: Vec<u16> = forms
            .iter()
            .map(|(_, tag)| intern(&mut self.tags, tag))
            .collect();
        let prefix_ids = vec![0; forms.len()];

        let paradigm = Paradigm::new(&suffix_ids, &tag_ids, &prefix_ids)
            .unwrap_or_else(|| unreachable!("id arrays are built from one slice"));
        let paradigm_id = match self.paradigms.iter().position(|p| *p == paradigm) {
            Some(id) => id as u16,
            None => {
                self.paradigms.push(paradigm);
                (self.paradigms.len() - 1) as u16
            }
        };

        for (slot, (suffix, _)) in forms.iter().enumerate() {
            self.forms.push((
                format!("{stem}{suffix}"),
                WordPayload::new(paradigm_id, slot as u16),
            ));
        }
        paradigm_id
    }

    /// Store `form` with an arbitrary payload, valid or not.
    pub fn add_raw_form(&mut self, form: &str, payload: WordPayload) {
        self.forms.push((form.to_string(), payload));
    }

    pub fn paradigm_table(&self) -> ParadigmTable {
        ParadigmTable::new(self.paradigms.clone())
    }

    pub fn words_dawg(&self) -> Result<BytesDawg> {
        let mut builder = PayloadDawgBuilder::new(self.config.dict.binascii_workaround)
            .with_separator(self.config.dict.payload_separator);
        for (form, payload) in &self.forms {
            builder.insert(form, &payload.to_bytes())?;
        }
        builder.build()
    }

    pub fn build(&self) -> Result<MorphAnalyzer> {
        MorphAnalyzer::new(
            self.words_dawg()?.completion_dawg().clone(),
            self.paradigm_table(),
            self.suffixes.clone(),
            self.tags.clone(),
            &self.config,
        )
    }

    /// The four asset files as they'd appear on disk: words, paradigms,
    /// suffixes, tags.
    pub fn encode_assets(&self) -> Result<[Vec<u8>; 4]> {
        let mut words = Vec::new();
        binary::encode_completion_dawg(self.words_dawg()?.completion_dawg(), &mut words);
        let mut paradigms = Vec::new();
        self.paradigm_table().encode(&mut paradigms);

        Ok([
            words,
            paradigms,
            binary::encode_string_table(&self.suffixes, "suffix")?,
            binary::encode_string_table(&self.tags, "tag")?,
        ])
    }

    /// Write a dictionary directory using the configured file names.
    pub fn write_dir(&self, dir: &Path) -> Result<()> {
        let files = &self.config.files;
        let [words, paradigms, suffixes, tags] = self.encode_assets()?;

        for (name, bytes) in [
            (&files.words, words),
            (&files.paradigms, paradigms),
            (&files.suffixes, suffixes),
            (&files.tags, tags),
        ] {
            let path = dir.join(name);
            fs::write(&path, bytes).map_err(|e| DictError::io(path, e))?;
        }
        Ok(())
    }

    pub fn bundle(&self) -> Result<Bundle> {
        let [dawg_bytes, paradigm_bytes, suffix_bytes, tag_bytes] = self.encode_assets()?;
        let flags = if self.config.dict.binascii_workaround {
            BundleFlags::new().with_binascii_payloads()
        } else {
            BundleFlags::new()
        };

        Ok(Bundle {
            flags,
            dawg_bytes,
            paradigm_bytes,
            suffix_bytes,
            tag_bytes,
        })
    }
}

fn intern(table: &mut Vec<String>, value: &str) -> u16 {
    match table.iter().position(|s| s == value) {
        Some(id) => id as u16,
        None => {
            table.push(value.to_string());
            (table.len() - 1) as u16
        }
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Builder holding a handful of Ukrainian nouns.
///
/// | form  | lemma | tag              |
/// |-------|-------|------------------|
/// | кіт   | кіт   | noun:m:v_naz     |
/// | кота  | кіт   | noun:m:v_rod     |
/// | коти  | кіт   | noun:m:v_naz:p   |
/// | пес   | пес   | noun:m:v_naz     |
/// | пса   | пес   | noun:m:v_rod     |
/// | пси   | пес   | noun:m:v_naz:p   |
/// | мати  | мати  | noun:f:v_naz     |
/// | мати  | мати  | verb:inf         |
pub fn sample_builder() -> MorphDictBuilder {
    let mut builder = MorphDictBuilder::new();
    builder.add_lexeme(
        "к",
        &[
            ("іт", "noun:m:v_naz"),
            ("ота", "noun:m:v_rod"),
            ("оти", "noun:m:v_naz:p"),
        ],
    );
    builder.add_lexeme(
        "п",
        &[
            ("ес", "noun:m:v_naz"),
            ("са", "noun:m:v_rod"),
            ("си", "noun:m:v_naz:p"),
        ],
    );
    builder.add_lexeme("мат", &[("и", "noun:f:v_naz"), ("ері", "noun:f:v_rod")]);
    builder.add_lexeme("ма", &[("ти", "verb:inf"), ("ю", "verb:pres:s:1")]);
    builder
}

/// Analyzer over [`sample_builder`].
pub fn sample_analyzer() -> MorphAnalyzer {
    sample_builder()
        .build()
        .expect("sample dictionary is well-formed")
}
