// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit cursor primitives and the name symbol packing built on them.
//!
//! Names are sequences of 12-bit symbol codes written MSB-first with no
//! padding between symbols. Two symbols fill exactly three bytes, so an odd
//! count leaves a half byte at the tail. All of the carry bookkeeping across
//! byte boundaries lives in `BitWriter::write_bits` and `BitReader::peek_bits`;
//! nothing else in the crate shifts bits across bytes.
//!
//! # Name Payload
//!
//! ```text
//! symbols: [12 bits; n]        each >= 64
//! year:    8 bits if n even    right-aligned discard-year delta (1..=63)
//!          12 bits if n odd
//! filler:  4 zero bits if n odd and there is no year
//! ```
//!
//! The year field takes whatever is left of the final byte(s) once six bits
//! are guaranteed, which is why it never reaches 64 and never looks like a
//! symbol. A filler nibble decodes as delta 0, which means "no year".
//!
//! Decoding reads 12-bit groups while they are >= 64. The first group below
//! 64 (or a tail shorter than 12 bits) starts the year field, and everything
//! remaining is that field.

use crate::error::{RegionError, Result};
use crate::util::char_table::FIRST_SYMBOL;

/// Width of one symbol code.
pub const SYMBOL_BITS: u8 = 12;

/// Minimum width reserved for a discard-year delta.
pub const YEAR_BITS: usize = 6;

/// Largest storable discard-year delta.
pub const MAX_YEAR_DELTA: u8 = (1 << YEAR_BITS) - 1;

// ============================================================================
// BIT WRITER
// ============================================================================

/// Append-only MSB-first bit buffer. Unwritten bits of the last byte are 0.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    /// Append the low `width` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, width: u8) {
        debug_assert!(width <= 32, "width {} exceeds 32 bits", width);
        debug_assert!(
            width == 32 || value >> width == 0,
            "value {} does not fit in {} bits",
            value,
            width
        );

        let mut remaining = width as usize;
        while remaining > 0 {
            let offset = self.bit_len % 8;
            if offset == 0 {
                self.buf.push(0);
            }
            let free = 8 - offset;
            let take = free.min(remaining);
            let chunk = ((value >> (remaining - take)) & ((1u32 << take) - 1)) as u8;
            let last = self.buf.len() - 1;
            self.buf[last] |= chunk << (free - take);
            self.bit_len += take;
            remaining -= take;
        }
    }

    /// Bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The buffer, trailing partial byte zero-padded on its low end.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// BIT READER
// ============================================================================

/// MSB-first cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current bit offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    /// Look at the next `width` bits without consuming them.
    ///
    /// `None` if fewer than `width` bits remain or `width > 32`.
    pub fn peek_bits(&self, width: u8) -> Option<u32> {
        let width = width as usize;
        if width > 32 || width > self.remaining() {
            return None;
        }

        let mut value = 0u32;
        let mut pos = self.pos;
        let mut remaining = width;
        while remaining > 0 {
            let byte = self.bytes[pos / 8];
            let avail = 8 - pos % 8;
            let take = avail.min(remaining);
            let chunk = (u32::from(byte) >> (avail - take)) & ((1u32 << take) - 1);
            value = (value << take) | chunk;
            pos += take;
            remaining -= take;
        }
        Some(value)
    }

    /// Consume the next `width` bits.
    pub fn read_bits(&mut self, width: u8) -> Option<u32> {
        let value = self.peek_bits(width)?;
        self.pos += width as usize;
        Some(value)
    }
}

// ============================================================================
// NAME SYMBOL PACKING
// ============================================================================

/// Bytes needed for `symbol_count` symbols plus an optional year.
#[inline]
pub fn packed_len(symbol_count: usize, has_year: bool) -> usize {
    let bits = symbol_count * SYMBOL_BITS as usize + if has_year { YEAR_BITS } else { 0 };
    bits.div_ceil(8)
}

/// Pack symbol codes and an optional year delta into whole bytes.
///
/// Callers guarantee every symbol is in `64..4096` and the delta is in
/// `1..=63`.
pub fn pack_symbols(symbols: &[u16], year_delta: Option<u8>) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(packed_len(symbols.len(), year_delta.is_some()));
    for &symbol in symbols {
        debug_assert!(symbol >= FIRST_SYMBOL, "symbol {} is in the reserved range", symbol);
        writer.write_bits(u32::from(symbol), SYMBOL_BITS);
    }
    if let Some(delta) = year_delta {
        debug_assert!((1..=MAX_YEAR_DELTA).contains(&delta));
        let used = writer.bit_len();
        let width = (used + YEAR_BITS).div_ceil(8) * 8 - used;
        writer.write_bits(u32::from(delta), width as u8);
    }
    writer.into_bytes()
}

/// Inverse of [`pack_symbols`]: symbol codes and the year delta, if any.
pub fn unpack_symbols(payload: &[u8]) -> Result<(Vec<u16>, Option<u8>)> {
    let mut reader = BitReader::new(payload);
    let mut symbols = Vec::with_capacity(payload.len() * 8 / SYMBOL_BITS as usize);

    while let Some(value) = reader.peek_bits(SYMBOL_BITS) {
        if value < u32::from(FIRST_SYMBOL) {
            break;
        }
        reader.read_bits(SYMBOL_BITS);
        symbols.push(value as u16);
    }

    if symbols.is_empty() {
        return Err(RegionError::corrupt("record payload holds no name symbols"));
    }

    let tail = reader.remaining();
    if tail > SYMBOL_BITS as usize {
        return Err(RegionError::corrupt(format!(
            "year field spans {} bits after {} symbols",
            tail,
            symbols.len()
        )));
    }
    let delta = reader.read_bits(tail as u8).unwrap_or(0);
    if delta > u32::from(MAX_YEAR_DELTA) {
        return Err(RegionError::corrupt(format!(
            "year delta {} exceeds {}",
            delta, MAX_YEAR_DELTA
        )));
    }

    Ok((symbols, (delta > 0).then_some(delta as u8)))
}
