// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Region lookup against an artifact on disk.
//!
//! A lookup touches four places in the file: the header, the index block,
//! the character table, and one province's run of records. Nothing is
//! cached between calls; each call opens the file, does its bounded reads and
//! drops the handle on every exit path. For repeated queries build a
//! [`RegionTrie`](crate::trie::RegionTrie) once instead.
//!
//! # Walk
//!
//! Records of a province are contiguous and ascend by code, so the labels of
//! interest (`XX0000`, `XXXX00`, the target) appear in that order. The walk
//! collects those three, stops at the exact target, and otherwise stops at
//! the first record of the next province. Running off the province without
//! reaching the target returns what was collected with `matched == false`.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::binary::{
    ArtifactHeader, ProvinceIndex, RecordFrames, INDEX_BLOCK_SIZE, MAX_CHAR_TABLE_BYTES,
};
use crate::error::{RegionError, Result};
use crate::types::{Lookup, RegionCode};
use crate::util::char_table::CharTable;

/// Look up `code` in the artifact at `path`.
///
/// `InvalidCodeFormat` is reported before the file is touched.
pub fn search(path: impl AsRef<Path>, code: &str) -> Result<Lookup> {
    let target = RegionCode::parse(code)?;
    let file = File::open(path.as_ref())?;
    lookup(&mut BufReader::new(file), target)
}

/// Look up `code` in an artifact behind any seekable reader.
pub fn search_in<R: Read + Seek>(reader: &mut R, code: &str) -> Result<Lookup> {
    let target = RegionCode::parse(code)?;
    lookup(reader, target)
}

fn lookup<R: Read + Seek>(reader: &mut R, target: RegionCode) -> Result<Lookup> {
    reader.seek(SeekFrom::Start(0))?;
    let header = ArtifactHeader::read(reader)?;
    let offsets = header.section_offsets();
    log::debug!(
        "artifact version {} index at {}",
        header.version,
        header.index_offset
    );

    let mut index_block = [0u8; INDEX_BLOCK_SIZE];
    reader.seek(SeekFrom::Start(offsets.index.0 as u64))?;
    reader.read_exact(&mut index_block)?;
    let index = ProvinceIndex::decode(&index_block)?;

    let province = target.province();
    let Some(offset) = index.find(province as u8) else {
        log::debug!("province {:02} is not indexed", province);
        return Ok(Lookup::not_found(target.to_string()));
    };
    let offset = offset as usize;
    if !offsets.is_record_offset(offset) {
        return Err(RegionError::corrupt(format!(
            "index points province {:02} at offset {}, outside the records block",
            province, offset
        )));
    }
    log::debug!("province {:02} starts at offset {}", province, offset);

    let table = read_char_table(reader, offsets.char_table_start as u64)?;

    // Everything from the province's first record to the end of the records
    // block. The walk usually stops well before the end.
    let mut window = vec![0u8; offsets.records.1 - offset];
    reader.seek(SeekFrom::Start(offset as u64))?;
    reader.read_exact(&mut window)?;

    let lineage = target.lineage();
    let mut result = Lookup::not_found(target.to_string());
    for (i, frame) in RecordFrames::new(&window).enumerate() {
        let frame = frame?;
        if frame.code.province() != province {
            if i == 0 {
                return Err(RegionError::corrupt(format!(
                    "index points province {:02} at a record of region {}",
                    province, frame.code
                )));
            }
            log::debug!("left province {:02} at region {}", province, frame.code);
            break;
        }
        if !lineage.contains(&frame.code) {
            continue;
        }

        let record = frame.decode(&table)?;
        result.push(record.label());
        if frame.code == target {
            result.matched = true;
            result.discard_year = record.discard_year;
            break;
        }
    }

    Ok(result)
}

/// Read the character table block, which runs to end of file.
pub(crate) fn read_char_table<R: Read + Seek>(reader: &mut R, start: u64) -> Result<CharTable> {
    reader.seek(SeekFrom::Start(start))?;
    let mut bytes = Vec::new();
    reader
        .take(MAX_CHAR_TABLE_BYTES + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_CHAR_TABLE_BYTES {
        return Err(RegionError::corrupt(format!(
            "character table exceeds {} bytes",
            MAX_CHAR_TABLE_BYTES
        )));
    }
    CharTable::decode(&bytes)
}
