// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix completion over a [`Dictionary`] + [`Guide`] pair.
//!
//! The walk is a depth-first, leftmost-first traversal driven entirely by
//! the guide's child/sibling labels. It keeps an explicit stack of states and
//! a parallel buffer of the labels taken, so there's no recursion and the
//! caller pulls one completion at a time.
//!
//! ```text
//!   descend ──▶ terminal? ──yes──▶ yield ──▶ child? ──yes──▶ descend
//!      ▲            │no                        │no
//!      └── child ◀──┘                          ▼
//!      ▲                             pop; sibling of popped?
//!      └────────────── yes ◀───────────────────┤
//!                                              no ──▶ pop again (or finish)
//! ```
//!
//! A guide that names a label with no matching transition means the asset is
//! broken. So does a non-terminal state with no guide child, a path deeper
//! than the unit table, or a sibling chain longer than the byte alphabet.
//! We yield one [`DictError::BrokenGuide`] and stop rather than return a
//! silently truncated (or endless) result set.

use std::iter::FusedIterator;

use super::{Dictionary, Guide};
use crate::error::{DictError, Result};

/// A state has at most 255 outgoing labels, so at most 254 sibling hops.
const MAX_SIBLING_HOPS: u8 = u8::MAX - 1;

/// Automaton with a guide, able to enumerate completions of a prefix.
#[derive(Debug, Clone)]
pub struct CompletionDawg {
    dictionary: Dictionary,
    guide: Guide,
}

impl CompletionDawg {
    /// Pair a dictionary with its guide.
    ///
    /// Lengths are checked by the loaders in [`crate::binary`]; a mismatched
    /// pair built by hand just produces `BrokenGuide` errors during walks.
    pub fn new(dictionary: Dictionary, guide: Guide) -> Self {
        Self { dictionary, guide }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    /// Exact-key membership.
    pub fn has(&self, key: &[u8]) -> bool {
        self.dictionary.has(key)
    }

    /// Every suffix `s` such that `prefix + s` is a stored key.
    ///
    /// Each call starts a fresh walk. Unknown prefixes give an empty iterator.
    pub fn completions(&self, prefix: &[u8]) -> Completions<'_> {
        let start = self
            .dictionary
            .follow_bytes(prefix, self.dictionary.root())
            .filter(|&state| (state as usize) < self.dictionary.len())
            .filter(|&state| !self.is_dead_end(state));

        Completions {
            dictionary: &self.dictionary,
            guide: &self.guide,
            stack: start.into_iter().collect(),
            completion: Vec::new(),
            hops: Vec::new(),
            yielded: false,
        }
    }

    /// Non-terminal, no guide child and no transitions at all. Only the root
    /// of an empty automaton looks like this; any other childless state is
    /// left for the walk to report as a broken guide.
    fn is_dead_end(&self, state: u32) -> bool {
        !self.dictionary.has_value(state)
            && self.guide.child(state).is_none()
            && (1..=u8::MAX).all(|label| self.dictionary.follow_byte(state, label).is_none())
    }

    /// True iff at least one stored key starts with `prefix`.
    pub fn has_completions(&self, prefix: &[u8]) -> bool {
        self.completions(prefix).next().is_some()
    }

    /// Completions decoded as UTF-8.
    pub fn completion_strings<'a>(
        &'a self,
        prefix: &[u8],
    ) -> impl Iterator<Item = Result<String>> + 'a {
        self.completions(prefix).map(|completion| {
            String::from_utf8(completion?).map_err(|_| DictError::InvalidUtf8)
        })
    }
}

/// Lazy iterator over completions of one prefix.
///
/// Yields `Ok(suffix_bytes)` per stored key, or a single `Err` if the guide
/// is inconsistent with the automaton. Fused.
#[derive(Debug)]
pub struct Completions<'a> {
    dictionary: &'a Dictionary,
    guide: &'a Guide,
    /// States from the prefix state down to the current one.
    stack: Vec<u32>,
    /// Labels taken below the prefix state; always `stack.len() - 1` long.
    completion: Vec<u8>,
    /// Sibling hops taken at each level of `completion`.
    hops: Vec<u8>,
    /// The top of the stack has already been yielded.
    yielded: bool,
}

impl Completions<'_> {
    fn push(&mut self, state: u32, label: u8, hops: u8) -> Result<()> {
        let next = self
            .dictionary
            .follow_byte(state, label)
            .ok_or(DictError::BrokenGuide { state, label })?;
        // A path longer than the unit table can only come from a cyclic guide
        if self.stack.len() >= self.dictionary.len() {
            return Err(DictError::BrokenGuide { state, label });
        }
        self.stack.push(next);
        self.completion.push(label);
        self.hops.push(hops);
        Ok(())
    }

    /// Move past the completion just yielded. Returns false once exhausted.
    fn advance(&mut self) -> Result<bool> {
        let Some(&state) = self.stack.last() else {
            return Ok(false);
        };

        // A longer key may share this one as a prefix
        if let Some(label) = self.guide.child(state) {
            self.push(state, label, 0)?;
            return Ok(true);
        }

        loop {
            let Some(popped) = self.stack.pop() else {
                return Ok(false);
            };
            let Some(&parent) = self.stack.last() else {
                return Ok(false);
            };
            self.completion.pop();
            let hops = self.hops.pop().unwrap_or(0);

            if let Some(label) = self.guide.sibling(popped) {
                // Longer chains can only come from a cyclic guide
                if hops >= MAX_SIBLING_HOPS {
                    return Err(DictError::BrokenGuide { state: parent, label });
                }
                self.push(parent, label, hops + 1)?;
                return Ok(true);
            }
        }
    }

    /// Follow first children until a key terminates.
    fn descend(&mut self) -> Result<()> {
        while let Some(&state) = self.stack.last() {
            if self.dictionary.has_value(state) {
                break;
            }
            let label = self
                .guide
                .child(state)
                .ok_or(DictError::BrokenGuide { state, label: 0 })?;
            self.push(state, label, 0)?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<bool> {
        if self.yielded && !self.advance()? {
            return Ok(false);
        }
        self.descend()?;
        self.yielded = true;
        Ok(!self.stack.is_empty())
    }
}

impl Iterator for Completions<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }

        match self.step() {
            Ok(true) => Some(Ok(self.completion.clone())),
            Ok(false) => {
                self.stack.clear();
                None
            }
            Err(e) => {
                self.stack.clear();
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Completions<'_> {}
