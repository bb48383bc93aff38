// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks shared by encoder and decoder.
//!
//! A region code is six decimal digits read as province(2) / city(2) /
//! county(2). Zeroed trailing pairs name the enclosing level: `530000` is
//! Yunnan, `530900` is Lincang inside it, `530925` a county inside that.
//!
//! # Invariants
//!
//! - **RegionCode**: `value <= 999_999`, which fits the 20-bit code field.
//! - **RegionRecord**: `name` is a non-empty stem without its type suffix;
//!   `discard_year`, when present, is in `1981..=2043`.
//! - **Lookup**: `chain == ancestors.concat()`; an empty `ancestors` is the
//!   not-found outcome.

use std::fmt;

use serde::Serialize;

use crate::binary::YEAR_BASE;
use crate::classify::RegionType;
use crate::error::{RegionError, Result};

// =============================================================================
// REGION CODE
// =============================================================================

/// Validated 6-digit administrative region code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RegionCode(u32);

impl RegionCode {
    /// Largest 6-digit code.
    pub const MAX: u32 = 999_999;

    /// Parse a code that must be exactly six ASCII digits.
    pub fn parse(code: &str) -> Result<Self> {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RegionError::InvalidCodeFormat {
                code: code.to_string(),
            });
        }
        code.parse()
            .map(RegionCode)
            .map_err(|_| RegionError::InvalidCodeFormat {
                code: code.to_string(),
            })
    }

    /// Wrap a decoded value, rejecting anything wider than six digits.
    #[inline]
    pub fn from_u32(value: u32) -> Option<Self> {
        (value <= Self::MAX).then_some(RegionCode(value))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Leading two digits.
    #[inline]
    pub fn province(self) -> u32 {
        self.0 / 10_000
    }

    /// The enclosing province-level code (`XX0000`).
    #[inline]
    pub fn province_code(self) -> Self {
        RegionCode(self.province() * 10_000)
    }

    /// The enclosing city-level code (`XXXX00`).
    #[inline]
    pub fn city_code(self) -> Self {
        RegionCode(self.0 / 100 * 100)
    }

    /// The codes a lookup collects labels for, most general first.
    pub fn lineage(self) -> [RegionCode; 3] {
        [self.province_code(), self.city_code(), self]
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Serialized as the zero-padded string, the form codes are written in.
impl Serialize for RegionCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// One dataset row as supplied to `pack`: raw code, raw name, optional year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub code: String,
    pub name: String,
    pub discard_year: Option<u16>,
}

impl SourceRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            discard_year: None,
        }
    }

    /// A unit abolished or merged in `year`.
    pub fn discarded(code: impl Into<String>, name: impl Into<String>, year: u16) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            discard_year: Some(year),
        }
    }
}

impl From<(&str, &str)> for SourceRecord {
    fn from((code, name): (&str, &str)) -> Self {
        SourceRecord::new(code, name)
    }
}

impl From<(&str, &str, u16)> for SourceRecord {
    fn from((code, name, year): (&str, &str, u16)) -> Self {
        SourceRecord::discarded(code, name, year)
    }
}

/// A region as stored in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRecord {
    pub code: RegionCode,
    pub region_type: RegionType,
    /// Stem without the type suffix.
    pub name: String,
    pub discard_year: Option<u16>,
}

impl RegionRecord {
    /// Stem plus type suffix: "崇文" + District → "崇文区".
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.region_type.label())
    }

    /// Display label used in lookups: "崇文区 (2010年废止)".
    pub fn label(&self) -> String {
        render_label(&self.name, self.region_type, self.discard_year)
    }

    /// Stored year delta, if any.
    pub fn year_delta(&self) -> Option<u16> {
        self.discard_year.map(|year| year.saturating_sub(YEAR_BASE))
    }
}

/// Render a decoded name the way lookups report it.
pub fn render_label(stem: &str, region_type: RegionType, discard_year: Option<u16>) -> String {
    match discard_year {
        Some(year) => format!("{}{} ({}年废止)", stem, region_type.label(), year),
        None => format!("{}{}", stem, region_type.label()),
    }
}

// =============================================================================
// LOOKUP RESULT
// =============================================================================

/// Ancestor chain for one queried code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// The queried code.
    pub code: String,
    /// All labels concatenated without separator.
    pub chain: String,
    /// Labels from most general to most specific.
    pub ancestors: Vec<String>,
    /// Discard year of the exact code, when it was reached.
    pub discard_year: Option<u16>,
    /// Whether the exact code was reached. A partial chain has this false.
    pub matched: bool,
}

impl Lookup {
    /// The empty, not-found outcome.
    pub fn not_found(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, label: String) {
        self.chain.push_str(&label);
        self.ancestors.push(label);
    }

    /// True for the not-found outcome.
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// The `(chain, ancestors)` pair.
    pub fn into_pair(self) -> (String, Vec<String>) {
        (self.chain, self.ancestors)
    }
}
