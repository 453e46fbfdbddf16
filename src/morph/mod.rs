// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Morphological layer: paradigms, word payloads and the analyzer.
//!
//! ```text
//!   "коти" ──▶ words DAWG ──▶ [WordPayload { paradigm_id, slot }]
//!                                      │
//!                           ParadigmTable[paradigm_id]
//!                                      │
//!            suffixes[slot], suffixes[0], tags[slot]
//!                                      │
//!                                      ▼
//!                     MorphInterp { lemma: "кіт", tag }
//! ```

mod analyzer;
mod paradigm;
mod payload;

pub use analyzer::{MorphAnalyzer, MorphInterp};
pub use paradigm::{Paradigm, ParadigmTable};
pub use payload::WordPayload;
