// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Province index: where each province's records begin.
//!
//! # Wire Format
//!
//! ```text
//! entries: [u24; 34]   province << 17 | record offset, big-endian
//! ```
//!
//! Offsets are absolute file positions. Used entries come first in ascending
//! province order; the rest of the block is zero. An all-zero entry can never
//! be a real one because no record starts at offset 0.

use crate::binary::header::{INDEX_BLOCK_SIZE, INDEX_ENTRY_SIZE, INDEX_OFFSET_BITS, MAX_PROVINCES};
use crate::error::{RegionError, Result};

const OFFSET_MASK: u32 = (1 << INDEX_OFFSET_BITS) - 1;

/// One province and the file offset of its first record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub province: u8,
    pub offset: u32,
}

impl IndexEntry {
    #[inline]
    fn pack(self) -> u32 {
        (u32::from(self.province) << INDEX_OFFSET_BITS) | self.offset
    }

    #[inline]
    fn unpack(value: u32) -> Self {
        Self {
            province: (value >> INDEX_OFFSET_BITS) as u8,
            offset: value & OFFSET_MASK,
        }
    }
}

/// Up to 34 entries, kept sorted by province whatever order they arrive in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceIndex {
    entries: Vec<IndexEntry>,
}

impl ProvinceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the first record of a province.
    ///
    /// Province blocks may sit in the records in any order; the entry is
    /// slotted in by province. Registering a province twice is a caller bug.
    pub fn push(&mut self, province: u8, offset: u32) -> Result<()> {
        if self.entries.len() == MAX_PROVINCES {
            return Err(RegionError::IndexCapacityExceeded {
                count: self.entries.len() + 1,
                max: MAX_PROVINCES,
            });
        }
        debug_assert!(province < 100);
        debug_assert!(offset <= OFFSET_MASK);
        let slot = self.entries.binary_search_by_key(&province, |e| e.province);
        debug_assert!(slot.is_err(), "province {} registered twice", province);
        if let Err(at) = slot {
            self.entries.insert(at, IndexEntry { province, offset });
        }
        Ok(())
    }

    /// Offset of `province`'s first record.
    pub fn find(&self, province: u8) -> Option<u32> {
        self.entries
            .binary_search_by_key(&province, |e| e.province)
            .ok()
            .map(|i| self.entries[i].offset)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the full fixed-size block.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        let start = buf.len();
        for entry in &self.entries {
            buf.extend_from_slice(&entry.pack().to_be_bytes()[1..]);
        }
        buf.resize(start + INDEX_BLOCK_SIZE, 0);
    }

    /// Parse a block, skipping zero entries.
    pub fn decode(block: &[u8]) -> Result<Self> {
        if block.len() != INDEX_BLOCK_SIZE {
            return Err(RegionError::corrupt(format!(
                "index block is {} bytes, expected {}",
                block.len(),
                INDEX_BLOCK_SIZE
            )));
        }

        let mut entries: Vec<IndexEntry> = Vec::new();
        for chunk in block.chunks_exact(INDEX_ENTRY_SIZE) {
            let value = u32::from_be_bytes([0, chunk[0], chunk[1], chunk[2]]);
            if value == 0 {
                continue;
            }
            let entry = IndexEntry::unpack(value);
            if entry.province > 99 {
                return Err(RegionError::corrupt(format!(
                    "index names province {}",
                    entry.province
                )));
            }
            if let Some(prev) = entries.last() {
                if prev.province >= entry.province {
                    return Err(RegionError::corrupt(format!(
                        "index entries out of order: province {:02} after {:02}",
                        entry.province, prev.province
                    )));
                }
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }
}
