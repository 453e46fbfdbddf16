// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! DAWG-backed morphological dictionary.
//!
//! Loads dictionaries compiled with the Python `dawg` package (dawgdic
//! layout) and answers "what are the lemma and grammatical tag of this
//! word-form?" without ever decoding the whole automaton.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────┐
//! │  binary/     │────▶│   dawg/      │────▶│   morph/       │
//! │ (DAWG file,  │     │ (Dictionary, │     │ (ParadigmTable,│
//! │  bundle,     │     │  Guide,      │     │  WordPayload,  │
//! │  JSON tables)│     │  Completion, │     │  MorphAnalyzer)│
//! │              │     │  Bytes/Obj)  │     │                │
//! └──────────────┘     └──────────────┘     └────────────────┘
//!        │                    │                     │
//!        ▼                    ▼                     ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │            config.rs (DictConfig, AnalyzerConfig)        │
//! │            error.rs  (DictError, Result)                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every structure is immutable after load and shared through `Arc`, so a
//! single [`MorphAnalyzer`] can be cloned into as many threads as you like.
//!
//! # Usage
//!
//! ```ignore
//! use lexidawg::{AnalyzerConfig, MorphAnalyzer};
//!
//! let analyzer = MorphAnalyzer::open_dir("dict/".as_ref(), &AnalyzerConfig::default())?;
//! for interp in analyzer.tag("коти")? {
//!     println!("{} {}", interp.lemma, interp.tag);
//! }
//! ```

// Module declarations
pub mod binary;
pub mod config;
pub mod dawg;
pub mod error;
pub mod morph;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use binary::{Bundle, BundleFlags};
pub use config::{AnalyzerConfig, DictConfig, DictFiles};
pub use dawg::{BytesDawg, CompletionDawg, Completions, Dictionary, Guide, ObjectDawg, Payload};
pub use error::{DictError, Result};
pub use morph::{MorphAnalyzer, MorphInterp, Paradigm, ParadigmTable, WordPayload};
