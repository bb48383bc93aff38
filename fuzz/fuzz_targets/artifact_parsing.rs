// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact parsing under adversarial input.
//!
//! A damaged or hostile artifact must produce `CorruptArtifact`, never a
//! panic or an unbounded allocation.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use region_cn::{decode_records, search_in, ArtifactLayout, RegionCode};

fuzz_target!(|input: (u32, &[u8])| {
    let (raw_code, data) = input;
    let code = format!("{:06}", raw_code % (RegionCode::MAX + 1));

    if let Ok(lookup) = search_in(&mut Cursor::new(data), &code) {
        assert_eq!(lookup.chain, lookup.ancestors.concat());
        if lookup.discard_year.is_some() {
            assert!(lookup.matched, "discard year reported for an unmatched code");
        }
    }

    if decode_records(data).is_ok() {
        // a file that decodes cleanly also passes the layout checks or
        // fails them as corruption
        if let Err(e) = ArtifactLayout::from_bytes(data) {
            assert!(e.is_corrupt());
        }
    }
});
