// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character dictionary for name compression.
//!
//! Region names draw from a few thousand distinct ideographs, so each one gets
//! a dense 12-bit code instead of its 3-byte UTF-8 form. Codes start at 64:
//! everything below is reserved so the decoder can tell a trailing year field
//! apart from name content.
//!
//! Order is first-encountered and nothing else. The table is persisted in that
//! order, and the decoder numbers characters 64, 65, 66, ... as it reads them
//! back, so any other iteration order would silently disagree.
//!
//! # Wire Format
//!
//! ```text
//! chars: UTF-8, concatenated in code order, no count, no separators
//! ```
//!
//! The block runs to the end of the artifact.

use std::collections::{HashMap, HashSet};

use crate::error::{RegionError, Result};

/// First assigned symbol code. Values below are never symbols.
pub const FIRST_SYMBOL: u16 = 64;

/// 12-bit code space minus the reserved low values.
pub const MAX_CHARS: usize = (1 << 12) - FIRST_SYMBOL as usize;

/// Characters in first-encountered order plus the reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct CharTable {
    chars: Vec<char>,
    lookup: HashMap<char, u16>,
}

impl CharTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every distinct character of `names`, in order of appearance.
    pub fn from_names<'a, I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for c in names.into_iter().flat_map(str::chars) {
            if seen.insert(c) {
                ordered.push(c);
            }
        }
        if ordered.len() > MAX_CHARS {
            return Err(RegionError::CharacterTableOverflow {
                count: ordered.len(),
                max: MAX_CHARS,
            });
        }

        let mut table = Self::new();
        for c in ordered {
            table.insert(c);
        }
        Ok(table)
    }

    /// Insert a character and return its code, reusing an existing one.
    ///
    /// Panics if the 12-bit code space is exhausted; callers check first.
    fn insert(&mut self, c: char) -> u16 {
        if let Some(&code) = self.lookup.get(&c) {
            return code;
        }
        assert!(
            self.chars.len() < MAX_CHARS,
            "Character table overflow: cannot store more than {} characters",
            MAX_CHARS
        );
        let code = FIRST_SYMBOL + self.chars.len() as u16;
        self.chars.push(c);
        self.lookup.insert(c, code);
        code
    }

    /// Symbol code of `c`.
    pub fn code(&self, c: char) -> Option<u16> {
        self.lookup.get(&c).copied()
    }

    /// Character for symbol `code`.
    pub fn char_at(&self, code: u16) -> Option<char> {
        code.checked_sub(FIRST_SYMBOL)
            .and_then(|i| self.chars.get(i as usize))
            .copied()
    }

    /// Symbol codes of every character in `name`.
    pub fn encode_name(&self, name: &str) -> Option<Vec<u16>> {
        name.chars().map(|c| self.code(c)).collect()
    }

    /// Rebuild a name from symbol codes.
    pub fn decode_name(&self, symbols: &[u16]) -> Option<String> {
        symbols.iter().map(|&s| self.char_at(s)).collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Append the table block: the characters as UTF-8, in code order.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        let mut utf8 = [0u8; 4];
        for &c in &self.chars {
            buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
    }

    /// Parse a table block. Repeated characters would break the code
    /// mapping, so they are rejected along with invalid UTF-8.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| RegionError::corrupt(format!("character table is not UTF-8: {}", e)))?;

        let mut table = Self::new();
        for c in text.chars() {
            if table.lookup.contains_key(&c) {
                return Err(RegionError::corrupt(format!(
                    "character {:?} appears twice in the character table",
                    c
                )));
            }
            if table.len() == MAX_CHARS {
                return Err(RegionError::corrupt(format!(
                    "character table exceeds {} entries",
                    MAX_CHARS
                )));
            }
            table.insert(c);
        }
        Ok(table)
    }
}
