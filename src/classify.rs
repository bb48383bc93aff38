// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Administrative type suffixes: stripping them on the way in, rendering them
//! on the way out.
//!
//! Region names carry their level in the last few characters: 省, 市, 县,
//! 自治州 and friends. Storing the suffix as a 4-bit type instead of as
//! characters keeps the dictionary small and the records short.
//!
//! Matching is longest-suffix-first over one fixed table. "苗族自治县",
//! "自治县" and "县" all end 秀山土家族苗族自治县; only the five-character entry
//! is the right answer, so the table scan keeps the longest hit rather than
//! the first one.

use std::fmt;

/// Administrative classification, stored in the low 4 bits of a record's
/// code/type triple.
///
/// The discriminants are the on-disk values. `Other` (no suffix) is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum RegionType {
    Other = 0,
    Province = 1,
    AutonomousRegion = 2,
    City = 3,
    District = 4,
    County = 5,
    AutonomousCounty = 6,
    Banner = 7,
    League = 8,
    Prefecture = 9,
    AutonomousPrefecture = 10,
    TibetanAutonomousPrefecture = 11,
    ManchuAutonomousCounty = 12,
    MongolAutonomousCounty = 13,
    MiaoAutonomousCounty = 14,
    TujiaAutonomousCounty = 15,
}

/// Every suffixed type with its label. `Other` has no label and is absent.
pub const REGION_TYPES: [(RegionType, &str); 15] = [
    (RegionType::Province, "省"),
    (RegionType::AutonomousRegion, "自治区"),
    (RegionType::City, "市"),
    (RegionType::District, "区"),
    (RegionType::County, "县"),
    (RegionType::AutonomousCounty, "自治县"),
    (RegionType::Banner, "旗"),
    (RegionType::League, "盟"),
    (RegionType::Prefecture, "州"),
    (RegionType::AutonomousPrefecture, "自治州"),
    (RegionType::TibetanAutonomousPrefecture, "藏族自治州"),
    (RegionType::ManchuAutonomousCounty, "满族自治县"),
    (RegionType::MongolAutonomousCounty, "蒙古族自治县"),
    (RegionType::MiaoAutonomousCounty, "苗族自治县"),
    (RegionType::TujiaAutonomousCounty, "土家族自治县"),
];

impl RegionType {
    /// Suffix label appended when rendering a decoded name.
    pub fn label(self) -> &'static str {
        REGION_TYPES
            .iter()
            .find(|(t, _)| *t == self)
            .map_or("", |(_, label)| label)
    }

    /// On-disk 4-bit value.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Map a stored nibble back to a type. `None` for values no type uses.
    pub fn from_u8(value: u8) -> Option<Self> {
        if value == 0 {
            return Some(RegionType::Other);
        }
        REGION_TYPES
            .iter()
            .find(|(t, _)| t.as_u8() == value)
            .map(|(t, _)| *t)
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionType::Other => write!(f, "other"),
            t => write!(f, "{}", t.label()),
        }
    }
}

/// Split a name into its stem and administrative type.
///
/// Total: a name without a known suffix comes back unchanged as `Other`.
/// A name that is nothing but a suffix yields an empty stem; rejecting that
/// is the encoder's job.
pub fn classify(name: &str) -> (&str, RegionType) {
    let best = REGION_TYPES
        .iter()
        .filter(|(_, label)| name.ends_with(label))
        .max_by_key(|(_, label)| label.len());

    match best {
        Some((region_type, label)) => (&name[..name.len() - label.len()], *region_type),
        None => (name, RegionType::Other),
    }
}
