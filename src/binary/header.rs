// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact header and layout constants.
//!
//! The header is 6 bytes: a 32-bit build stamp and the 16-bit offset where the
//! records block ends and the province index begins. Everything else about
//! the layout follows from those two numbers and the fixed index size.
//!
//! `SectionOffsets` is the single source of truth for the layout. Both the
//! encoder and every reader compute section boundaries through it.

use std::io::{self, Read, Write};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Top-level administrative divisions; the index never holds more.
pub const MAX_PROVINCES: usize = 34;

/// Bytes per index entry: 7-bit province code + 17-bit record offset.
pub const INDEX_ENTRY_SIZE: usize = 3;

/// The index block is always this long, unused entries zero-filled.
pub const INDEX_BLOCK_SIZE: usize = MAX_PROVINCES * INDEX_ENTRY_SIZE;

/// Bits of an index entry holding the record offset.
pub const INDEX_OFFSET_BITS: u32 = 17;

/// Bits of a record's code/type triple holding the region code.
pub const CODE_BITS: u32 = 20;

/// Bits of a record's code/type triple holding the region type.
pub const TYPE_BITS: u32 = 4;

/// Discard years are stored as `year - YEAR_BASE`.
pub const YEAR_BASE: u16 = 1980;

/// Upper bound on the character table block (4032 chars, 4 UTF-8 bytes each).
pub const MAX_CHAR_TABLE_BYTES: u64 = 4032 * 4;

// ============================================================================
// HEADER
// ============================================================================

/// Fixed 6-byte artifact header, big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Opaque build stamp. Neither encoder nor decoder interprets it.
    pub version: u32,
    /// Byte offset of the index block, i.e. the end of the records block.
    pub index_offset: u16,
}

impl ArtifactHeader {
    // 4 (version) + 2 (index_offset)
    pub const SIZE: usize = 6;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.version.to_be_bytes())?;
        w.write_all(&self.index_offset.to_be_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf)?;

        let header = Self {
            version: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            index_offset: u16::from_be_bytes([buf[4], buf[5]]),
        };
        if (header.index_offset as usize) < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "index offset {} points inside the header",
                    header.index_offset
                ),
            ));
        }
        Ok(header)
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Byte ranges of each block. The character table runs to end of file, so
/// only its start is fixed by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub header: (usize, usize),
    pub records: (usize, usize),
    pub index: (usize, usize),
    pub char_table_start: usize,
}

impl SectionOffsets {
    pub fn from_header(h: &ArtifactHeader) -> Self {
        let records_end = h.index_offset as usize;
        let index_end = records_end + INDEX_BLOCK_SIZE;
        Self {
            header: (0, ArtifactHeader::SIZE),
            records: (ArtifactHeader::SIZE, records_end),
            index: (records_end, index_end),
            char_table_start: index_end,
        }
    }

    /// Length of the records block.
    pub fn records_len(&self) -> usize {
        self.records.1 - self.records.0
    }

    /// True if `offset` can start a record.
    pub fn is_record_offset(&self, offset: usize) -> bool {
        offset >= self.records.0 && offset < self.records.1
    }

    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}
