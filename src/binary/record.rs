// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record framing.
//!
//! # Wire Format
//!
//! ```text
//! len:     u8           total record length, this byte included
//! triple:  [u8; 3]      code << 4 | type, big-endian
//! payload: [u8; len-4]  packed name symbols + optional year (see bits.rs)
//! ```
//!
//! Records are laid out back to back. A reader advances by `len` bytes, so a
//! wrong length byte derails every record after it; `RecordFrame::parse`
//! refuses anything that cannot hold at least one symbol.

use crate::binary::bits::{pack_symbols, unpack_symbols, MAX_YEAR_DELTA};
use crate::binary::header::{CODE_BITS, TYPE_BITS, YEAR_BASE};
use crate::classify::RegionType;
use crate::error::{RegionError, Result};
use crate::types::{RegionCode, RegionRecord};
use crate::util::char_table::CharTable;

/// Length byte plus the code/type triple.
pub const RECORD_PREFIX_LEN: usize = 4;

/// Largest record the length byte can describe.
pub const MAX_RECORD_LEN: usize = u8::MAX as usize;

/// Smallest valid record: prefix plus one 12-bit symbol.
pub const MIN_RECORD_LEN: usize = RECORD_PREFIX_LEN + 2;

const TYPE_MASK: u32 = (1 << TYPE_BITS) - 1;

// ============================================================================
// ENCODING
// ============================================================================

/// Append one record to `buf` and return its length.
///
/// Nothing is written on error.
pub fn encode_record(record: &RegionRecord, table: &CharTable, buf: &mut Vec<u8>) -> Result<usize> {
    let code = record.code.to_string();
    if record.name.is_empty() {
        return Err(RegionError::EmptyRegionName { code });
    }

    let year_delta = match record.discard_year {
        None => None,
        Some(year) => match year.checked_sub(YEAR_BASE) {
            Some(delta) if (1..=u16::from(MAX_YEAR_DELTA)).contains(&delta) => Some(delta as u8),
            _ => return Err(RegionError::InvalidDiscardYear { code, year }),
        },
    };

    let mut symbols = Vec::with_capacity(record.name.chars().count());
    for ch in record.name.chars() {
        match table.code(ch) {
            Some(symbol) => symbols.push(symbol),
            None => return Err(RegionError::UnknownCharacter { code, ch }),
        }
    }

    let payload = pack_symbols(&symbols, year_delta);
    let len = RECORD_PREFIX_LEN + payload.len();
    if len > MAX_RECORD_LEN {
        return Err(RegionError::RegionNameTooLong { code, len });
    }

    let triple = (record.code.get() << TYPE_BITS) | u32::from(record.region_type.as_u8());
    buf.push(len as u8);
    buf.extend_from_slice(&triple.to_be_bytes()[1..]);
    buf.extend_from_slice(&payload);
    Ok(len)
}

// ============================================================================
// DECODING
// ============================================================================

/// A record whose prefix has been parsed but whose name is still packed.
///
/// Walking a province only needs codes; names are decoded for the handful
/// of records a lookup actually reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFrame<'a> {
    pub code: RegionCode,
    pub region_type: RegionType,
    pub payload: &'a [u8],
    /// Total bytes the record occupies.
    pub len: usize,
}

impl<'a> RecordFrame<'a> {
    /// Parse the record starting at `bytes[0]`.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let len = *bytes
            .first()
            .ok_or_else(|| RegionError::corrupt("record expected, found end of block"))?
            as usize;
        if len < MIN_RECORD_LEN {
            return Err(RegionError::corrupt(format!(
                "record length {} is below the minimum of {}",
                len, MIN_RECORD_LEN
            )));
        }
        let record = bytes.get(..len).ok_or_else(|| {
            RegionError::corrupt(format!(
                "record of {} bytes truncated to {}",
                len,
                bytes.len()
            ))
        })?;

        let triple = u32::from_be_bytes([0, record[1], record[2], record[3]]);
        let raw_code = triple >> TYPE_BITS;
        debug_assert!(raw_code < 1 << CODE_BITS);
        let code = RegionCode::from_u32(raw_code)
            .ok_or_else(|| RegionError::corrupt(format!("record code {} exceeds 6 digits", raw_code)))?;
        let nibble = (triple & TYPE_MASK) as u8;
        let region_type = RegionType::from_u8(nibble)
            .ok_or_else(|| RegionError::corrupt(format!("unknown region type {}", nibble)))?;

        Ok(Self {
            code,
            region_type,
            payload: &record[RECORD_PREFIX_LEN..],
            len,
        })
    }

    /// Unpack the name and year against the artifact's character table.
    pub fn decode(&self, table: &CharTable) -> Result<RegionRecord> {
        let (symbols, delta) = unpack_symbols(self.payload)?;
        let name = table.decode_name(&symbols).ok_or_else(|| {
            RegionError::corrupt(format!(
                "record {} uses a symbol outside the character table",
                self.code
            ))
        })?;
        Ok(RegionRecord {
            code: self.code,
            region_type: self.region_type,
            name,
            discard_year: delta.map(|d| YEAR_BASE + u16::from(d)),
        })
    }
}

/// Iterator over consecutive records of a block.
///
/// Yields at most one error, then stops: after a bad length byte there is no
/// way to find the next record.
#[derive(Debug, Clone)]
pub struct RecordFrames<'a> {
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> RecordFrames<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            failed: false,
        }
    }

    /// Byte offset of the next record, relative to the block start.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for RecordFrames<'a> {
    type Item = Result<RecordFrame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }
        match RecordFrame::parse(&self.bytes[self.pos..]) {
            Ok(frame) => {
                self.pos += frame.len;
                Some(Ok(frame))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
