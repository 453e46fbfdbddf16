// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typed view over a [`BytesDawg`].

use std::marker::PhantomData;

use super::BytesDawg;
use crate::error::Result;

/// A record that can be decoded from a DAWG payload.
pub trait Payload: Sized {
    /// Decode one payload. Errors mean the asset is corrupted and are
    /// propagated to the caller unchanged.
    fn from_payload(bytes: &[u8]) -> Result<Self>;
}

/// Raw bytes are trivially a payload.
impl Payload for Vec<u8> {
    fn from_payload(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

/// Key → every `T` stored under it.
#[derive(Debug)]
pub struct ObjectDawg<T> {
    bytes: BytesDawg,
    _record: PhantomData<fn() -> T>,
}

// Manual impl: `T` itself needn't be Clone
impl<T> Clone for ObjectDawg<T> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Payload> ObjectDawg<T> {
    pub fn new(bytes: BytesDawg) -> Self {
        Self {
            bytes,
            _record: PhantomData,
        }
    }

    pub fn bytes_dawg(&self) -> &BytesDawg {
        &self.bytes
    }

    /// True iff `key` has at least one record.
    pub fn has(&self, key: &str) -> bool {
        self.bytes.has(key)
    }

    /// All records stored under `key`, homonyms included, in guide order.
    pub fn get(&self, key: &str) -> Result<Vec<T>> {
        self.iter(key).collect()
    }

    /// Lazy form of [`get`](Self::get).
    pub fn iter<'a>(&'a self, key: &str) -> impl Iterator<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        self.bytes
            .payloads(key.as_bytes())
            .map(|payload| T::from_payload(&payload?))
    }
}
