// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for region lookup artifacts.
//!
//! An artifact is written once and read many times. Lookups never load it
//! whole: they read the header and the fixed-size index, seek to one
//! province's records, and stop as soon as the target is found. That is why
//! the index sits after the records (its position is known from the header
//! alone) and why the character table, the only variable-length block a
//! lookup needs in full, goes last.
//!
//! # Format Overview
//!
//! All integers are big-endian.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (6 bytes)                                           │
//! │   version: u32          opaque build stamp                 │
//! │   index_offset: u16     end of records, start of index     │
//! ├────────────────────────────────────────────────────────────┤
//! │ RECORDS [6, index_offset)                                  │
//! │   len: u8, code << 4 | type: u24, packed name [+ year]     │
//! │   grouped by province, ascending code order                │
//! ├────────────────────────────────────────────────────────────┤
//! │ INDEX (34 × 3 bytes, zero-padded)                          │
//! │   province << 17 | absolute record offset                  │
//! ├────────────────────────────────────────────────────────────┤
//! │ CHARACTER TABLE (to end of file)                           │
//! │   UTF-8, first-encountered order, symbol 64 first          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no magic number and no checksum. A reader that is handed the
//! wrong file gets `CorruptArtifact` from the first structural check that
//! fails, never a silently wrong answer for a well-formed artifact.

// Submodules
mod bits;
mod header;
mod index;
mod record;

pub use bits::{
    pack_symbols, packed_len, unpack_symbols, BitReader, BitWriter, MAX_YEAR_DELTA, SYMBOL_BITS,
    YEAR_BITS,
};
pub use header::{
    ArtifactHeader, SectionOffsets, CODE_BITS, INDEX_BLOCK_SIZE, INDEX_ENTRY_SIZE,
    INDEX_OFFSET_BITS, MAX_CHAR_TABLE_BYTES, MAX_PROVINCES, TYPE_BITS, YEAR_BASE,
};
pub use index::{IndexEntry, ProvinceIndex};
pub use record::{
    encode_record, RecordFrame, RecordFrames, MAX_RECORD_LEN, MIN_RECORD_LEN, RECORD_PREFIX_LEN,
};

use crate::error::{RegionError, Result};
use crate::util::char_table::CharTable;

// ============================================================================
// FULL ARTIFACT
// ============================================================================

/// A complete artifact held in memory.
#[derive(Debug, Clone)]
pub struct ArtifactLayer {
    pub header: ArtifactHeader,
    pub records_bytes: Vec<u8>,
    pub index: ProvinceIndex,
    pub char_table: CharTable,
}

impl ArtifactLayer {
    /// Section boundaries, from the header.
    pub fn section_offsets(&self) -> SectionOffsets {
        self.header.section_offsets()
    }

    /// Serialize in file order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let offsets = self.section_offsets();
        debug_assert_eq!(offsets.records_len(), self.records_bytes.len());

        let mut buf = Vec::with_capacity(offsets.char_table_start + self.char_table.len() * 3);
        buf.extend_from_slice(&self.header.version.to_be_bytes());
        buf.extend_from_slice(&self.header.index_offset.to_be_bytes());
        buf.extend_from_slice(&self.records_bytes);
        self.index.encode(&mut buf);
        self.char_table.encode(&mut buf);
        buf
    }

    /// Parse and validate a whole artifact.
    ///
    /// # Validation
    ///
    /// 1. Header present and `index_offset` past it
    /// 2. Index block present in full
    /// 3. Index entries ascending, each pointing into the records block
    /// 4. Character table is UTF-8 without repeats
    ///
    /// Records themselves are framed lazily by whoever walks them.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = ArtifactHeader::read(&mut &bytes[..])?;
        let offsets = header.section_offsets();

        let records = offsets.slice(bytes, offsets.records).ok_or_else(|| {
            RegionError::corrupt(format!(
                "records block ends at {} but the file has {} bytes",
                offsets.records.1,
                bytes.len()
            ))
        })?;
        let index_block = offsets.slice(bytes, offsets.index).ok_or_else(|| {
            RegionError::corrupt(format!(
                "index block ends at {} but the file has {} bytes",
                offsets.index.1,
                bytes.len()
            ))
        })?;

        let index = ProvinceIndex::decode(index_block)?;
        for entry in index.entries() {
            if !offsets.is_record_offset(entry.offset as usize) {
                return Err(RegionError::corrupt(format!(
                    "index points province {:02} at offset {}, outside the records block",
                    entry.province, entry.offset
                )));
            }
        }

        let char_table = CharTable::decode(&bytes[offsets.char_table_start..])?;

        Ok(Self {
            header,
            records_bytes: records.to_vec(),
            index,
            char_table,
        })
    }

    /// Frames of every record, in file order.
    pub fn frames(&self) -> RecordFrames<'_> {
        RecordFrames::new(&self.records_bytes)
    }
}
