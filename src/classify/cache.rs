//! Per-run classification memoization.
//!
//! Identical tiles are routinely embedded in many symbols of one style
//! document, so classification results are memoized by a content hash of
//! the raw blob bytes. A cache instance is scoped to one conversion call;
//! it is never shared between concurrent conversions.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::Result;
use crate::tile::decode_tile;
use crate::types::PatternSignature;

use super::classify;

/// A 256-bit blake3 digest of a tile's raw blob bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a blob.
    pub fn of(blob: &[u8]) -> Self {
        Self(*blake3::hash(blob).as_bytes())
    }

    /// Hex form, for display and reports.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

/// Memoized tile classifications, keyed by blob content hash.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: HashMap<ContentHash, PatternSignature>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tiles classified so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classify a blob, decoding it only on the first sighting of its hash.
    ///
    /// Decode failures are not cached: a later call with the same bytes
    /// will attempt the decode again.
    pub fn classify(&mut self, blob: &[u8]) -> Result<&PatternSignature> {
        match self.entries.entry(ContentHash::of(blob)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let tile = decode_tile(blob)?;
                Ok(slot.insert(classify(&tile)))
            }
        }
    }
}
