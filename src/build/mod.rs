// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact encoder.
//!
//! `pack` is a one-shot batch transform: clean and classify every name, build
//! the character table, frame the records province by province while
//! registering each province's first offset, then write header, records,
//! index and table in one go.
//!
//! Input must already be grouped by province and sorted by code within each
//! group. The encoder does not re-sort. Province blocks may come in any
//! order, since the index is kept sorted on its own. A province that
//! reappears after its block closed is rejected, as is a code seen twice; an
//! out-of-order code inside a province is logged and kept.
//!
//! The file at the target path is replaced atomically: the artifact is
//! staged in a temporary file in the same directory and renamed into place
//! only after every byte is written. On error nothing changes on disk.

pub mod dataset;

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::binary::{encode_record, ArtifactHeader, ArtifactLayer, ProvinceIndex};
use crate::classify::classify;
use crate::error::{RegionError, Result};
use crate::types::{RegionCode, RegionRecord, SourceRecord};
use crate::util::char_table::CharTable;
use crate::util::normalize::clean_name;

pub use dataset::{load_dataset, Dataset};

/// What a successful `pack` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PackSummary {
    pub version: u32,
    pub record_count: usize,
    pub province_count: usize,
    pub char_count: usize,
    pub records_len: usize,
    pub total_len: usize,
}

/// Clean, classify and validate one source row.
pub fn prepare_record(source: &SourceRecord) -> Result<RegionRecord> {
    let code = RegionCode::parse(&source.code)?;
    let cleaned = clean_name(&source.name);
    let (stem, region_type) = classify(&cleaned);
    if stem.is_empty() {
        return Err(RegionError::EmptyRegionName {
            code: source.code.clone(),
        });
    }
    Ok(RegionRecord {
        code,
        region_type,
        name: stem.to_string(),
        discard_year: source.discard_year,
    })
}

/// Encode `records` into an in-memory artifact.
pub fn build_layer(records: &[SourceRecord], version: u32) -> Result<ArtifactLayer> {
    let prepared = records
        .iter()
        .map(prepare_record)
        .collect::<Result<Vec<_>>>()?;

    let char_table = CharTable::from_names(prepared.iter().map(|r| r.name.as_str()))?;
    log::debug!(
        "character table: {} distinct characters over {} records",
        char_table.len(),
        prepared.len()
    );

    let mut records_bytes = Vec::new();
    let mut index = ProvinceIndex::new();
    let mut closed = HashSet::new();
    let mut seen = HashSet::new();
    let mut previous: Option<RegionCode> = None;

    for record in &prepared {
        let province = record.code.province();
        let offset = ArtifactHeader::SIZE + records_bytes.len();

        if !seen.insert(record.code) {
            return Err(RegionError::DuplicateRegionCode {
                code: record.code.to_string(),
            });
        }

        match previous {
            Some(prev) if prev.province() == province => {
                if record.code < prev {
                    log::warn!(
                        "region {} follows {} within province {:02}; kept in input order",
                        record.code,
                        prev,
                        province
                    );
                }
            }
            _ => {
                if !closed.insert(province) {
                    return Err(RegionError::ProvinceNotContiguous {
                        province,
                        code: record.code.to_string(),
                    });
                }
                index.push(province as u8, offset as u32)?;
                log::debug!("province {:02} starts at offset {}", province, offset);
            }
        }

        encode_record(record, &char_table, &mut records_bytes)?;
        let end = ArtifactHeader::SIZE + records_bytes.len();
        if end > usize::from(u16::MAX) {
            return Err(RegionError::ArtifactTooLarge { size: end });
        }
        previous = Some(record.code);
    }

    let index_offset = (ArtifactHeader::SIZE + records_bytes.len()) as u16;
    Ok(ArtifactLayer {
        header: ArtifactHeader {
            version,
            index_offset,
        },
        records_bytes,
        index,
        char_table,
    })
}

/// Encode `records` into artifact bytes.
pub fn encode_artifact(records: &[SourceRecord], version: u32) -> Result<Vec<u8>> {
    Ok(build_layer(records, version)?.to_bytes())
}

/// Encode `records` and atomically publish the artifact at `path`.
pub fn pack(path: impl AsRef<Path>, records: &[SourceRecord], version: u32) -> Result<PackSummary> {
    let path = path.as_ref();
    let layer = build_layer(records, version)?;
    let bytes = layer.to_bytes();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| RegionError::Io(e.error))?;

    let summary = PackSummary {
        version,
        record_count: records.len(),
        province_count: layer.index.len(),
        char_count: layer.char_table.len(),
        records_len: layer.records_bytes.len(),
        total_len: bytes.len(),
    };
    log::info!(
        "packed {} records ({} provinces, {} characters) into {} bytes at {}",
        summary.record_count,
        summary.province_count,
        summary.char_count,
        summary.total_len,
        path.display()
    );
    Ok(summary)
}
