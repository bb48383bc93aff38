// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whole-artifact reads: the build stamp, every record, and the section
//! layout shown by `region-cn inspect`.

use std::fs::{self, File};
use std::path::Path;

use crate::binary::{ArtifactHeader, ArtifactLayer, SectionOffsets};
use crate::error::{RegionError, Result};
use crate::types::RegionRecord;

/// Build stamp of the artifact at `path`.
pub fn read_version(path: impl AsRef<Path>) -> Result<u32> {
    let mut file = File::open(path.as_ref())?;
    Ok(ArtifactHeader::read(&mut file)?.version)
}

/// Every record of the artifact at `path`, in file order.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RegionRecord>> {
    decode_records(&fs::read(path.as_ref())?)
}

/// Every record of an in-memory artifact, in file order.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<RegionRecord>> {
    let layer = ArtifactLayer::from_bytes(bytes)?;
    let records = layer
        .frames()
        .map(|frame| frame.and_then(|f| f.decode(&layer.char_table)))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("decoded {} records", records.len());
    Ok(records)
}

/// One province's run of records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProvinceSpan {
    pub province: u8,
    /// Absolute offset of the first record.
    pub offset: u32,
    /// Bytes up to the next province or the end of the records block.
    pub len: usize,
    pub records: usize,
    /// Label of the `XX0000` record, when the province has one.
    pub label: Option<String>,
}

/// Parsed structure of an artifact.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    pub header: ArtifactHeader,
    pub sections: SectionOffsets,
    pub file_len: usize,
    pub record_count: usize,
    pub char_count: usize,
    pub provinces: Vec<ProvinceSpan>,
}

impl ArtifactLayout {
    /// Parse `bytes` and check that every index entry lands on the first
    /// record of its province.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let layer = ArtifactLayer::from_bytes(bytes)?;
        let sections = layer.section_offsets();
        let base = sections.records.0;

        let mut provinces: Vec<ProvinceSpan> = Vec::new();
        let mut record_count = 0;
        let mut frames = layer.frames();
        while let Some(frame) = frames.next() {
            let frame = frame?;
            let offset = (base + frames.position() - frame.len) as u32;
            let province = frame.code.province() as u8;
            record_count += 1;

            if provinces.last().is_none_or(|p| p.province != province) {
                if layer.index.find(province) != Some(offset) {
                    return Err(RegionError::corrupt(format!(
                        "province {:02} starts at offset {} but the index disagrees",
                        province, offset
                    )));
                }
                provinces.push(ProvinceSpan {
                    province,
                    offset,
                    len: 0,
                    records: 0,
                    label: None,
                });
            }
            if let Some(span) = provinces.last_mut() {
                span.len += frame.len;
                span.records += 1;
                if frame.code == frame.code.province_code() && span.label.is_none() {
                    span.label = Some(frame.decode(&layer.char_table)?.label());
                }
            }
        }

        if provinces.len() != layer.index.len() {
            return Err(RegionError::corrupt(format!(
                "index lists {} provinces, records hold {}",
                layer.index.len(),
                provinces.len()
            )));
        }

        Ok(Self {
            header: layer.header,
            sections,
            file_len: bytes.len(),
            record_count,
            char_count: layer.char_table.len(),
            provinces,
        })
    }

    /// Bytes taken by the character table.
    pub fn char_table_len(&self) -> usize {
        self.file_len - self.sections.char_table_start
    }
}
