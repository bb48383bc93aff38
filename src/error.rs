// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One error type for building and querying region artifacts.
//!
//! Build-time variants abort the whole `pack` call before anything becomes
//! visible on disk. Decode-time problems all collapse into `CorruptArtifact`,
//! which is deliberately distinct from the empty lookup that means "no data".

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("region code must be exactly 6 decimal digits, got {code:?}")]
    InvalidCodeFormat { code: String },

    #[error("region {code} has an empty name after stripping its type suffix")]
    EmptyRegionName { code: String },

    #[error("province index holds at most {max} provinces, dataset has {count}")]
    IndexCapacityExceeded { count: usize, max: usize },

    #[error("character table holds at most {max} characters, dataset has {count}")]
    CharacterTableOverflow { count: usize, max: usize },

    #[error("character {ch:?} in region {code} is missing from the character table")]
    UnknownCharacter { code: String, ch: char },

    #[error("discard year {year} of region {code} is outside 1981..=2043")]
    InvalidDiscardYear { code: String, year: u16 },

    #[error("record for region {code} needs {len} bytes, the length byte allows 255")]
    RegionNameTooLong { code: String, len: usize },

    #[error("province {province:02} reappears at region {code} after its block was closed")]
    ProvinceNotContiguous { province: u32, code: String },

    #[error("region {code} appears more than once")]
    DuplicateRegionCode { code: String },

    #[error("records block ends at byte {size}, beyond the 16-bit index offset")]
    ArtifactTooLarge { size: usize },

    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error(transparent)]
    Io(io::Error),
}

impl RegionError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        RegionError::CorruptArtifact(msg.into())
    }

    /// True for the decode-time corruption class.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, RegionError::CorruptArtifact(_))
    }
}

/// Truncation and malformed data are properties of the artifact, not of the
/// storage layer.
impl From<io::Error> for RegionError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => {
                RegionError::CorruptArtifact(format!("truncated read: {}", err))
            }
            io::ErrorKind::InvalidData => RegionError::CorruptArtifact(err.to_string()),
            _ => RegionError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegionError>;
