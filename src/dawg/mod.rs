// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! DAWG automaton, guide, completion and payload layers.
//!
//! Layered leaf-first, each one a thin read pattern over the one below:
//!
//! ```text
//! ┌──────────────┐   ┌─────────┐
//! │  Dictionary  │   │  Guide  │   units: follow_byte / has_value
//! └──────┬───────┘   └────┬────┘   guide: child / sibling
//!        └───────┬────────┘
//!        ┌───────▼────────┐
//!        │ CompletionDawg │        completions(prefix)
//!        └───────┬────────┘
//!        ┌───────▼────────┐
//!        │   BytesDawg    │        payloads(key) = completions(key ++ SEP)
//!        └───────┬────────┘
//!        ┌───────▼────────┐
//!        │ ObjectDawg<T>  │        get(key) -> Vec<T>
//!        └────────────────┘
//! ```
//!
//! Everything here is immutable once built. Dictionary and guide tables sit
//! behind `Arc`, so cloning any layer is a refcount bump and all of them are
//! `Send + Sync`.

pub mod codec;
mod bytes;
mod completion;
mod dictionary;
mod guide;
mod object;
pub mod units;

pub use bytes::BytesDawg;
pub use completion::{CompletionDawg, Completions};
pub use dictionary::{Dictionary, ROOT};
pub use guide::Guide;
pub use object::{ObjectDawg, Payload};
