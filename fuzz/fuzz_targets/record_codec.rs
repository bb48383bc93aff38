// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record encoding round trip over arbitrary names and years.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use region_cn::{decode_records, encode_artifact, RegionError, SourceRecord};

#[derive(Debug, Arbitrary)]
struct Row {
    code: u32,
    name: String,
    year: Option<u16>,
}

fuzz_target!(|rows: Vec<Row>| {
    let mut rows: Vec<SourceRecord> = rows
        .into_iter()
        .map(|r| SourceRecord {
            code: format!("{:06}", r.code % 1_000_000),
            name: r.name,
            discard_year: r.year,
        })
        .collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));
    rows.dedup_by(|a, b| a.code == b.code);

    let bytes = match encode_artifact(&rows, 7) {
        Ok(bytes) => bytes,
        Err(RegionError::CorruptArtifact(msg)) => panic!("encoder reported corruption: {}", msg),
        Err(_) => return,
    };

    let decoded = decode_records(&bytes).expect("freshly encoded artifact must decode");
    assert_eq!(decoded.len(), rows.len());
    for (source, record) in rows.iter().zip(&decoded) {
        assert_eq!(source.code, record.code.to_string());
        assert_eq!(source.discard_year, record.discard_year);
    }
});
