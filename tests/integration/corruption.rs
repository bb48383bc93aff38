//! Damaged artifacts are reported as corrupt, never as a panic or a wrong
//! answer.

use std::io::Cursor;

use region_cn::{decode_records, read_version, search, search_in, ArtifactLayout, RegionError};

use crate::common::{sample_artifact, write_temp};

const PROBES: &[&str] = &["110101", "130826", "500241", "530925", "632321", "710000"];

fn index_offset(bytes: &[u8]) -> usize {
    u16::from_be_bytes([bytes[4], bytes[5]]) as usize
}

#[test]
fn test_truncated_header() {
    let artifact = write_temp(&sample_artifact()[..3]);
    let err = search(&artifact.path, "110101").unwrap_err();
    assert!(err.is_corrupt(), "{err}");
    assert!(read_version(&artifact.path).unwrap_err().is_corrupt());
}

#[test]
fn test_empty_file() {
    let artifact = write_temp(&[]);
    assert!(search(&artifact.path, "110101").unwrap_err().is_corrupt());
}

#[test]
fn test_index_offset_inside_header() {
    let mut bytes = sample_artifact();
    bytes[4] = 0;
    bytes[5] = 2;
    let artifact = write_temp(&bytes);
    assert!(search(&artifact.path, "110101").unwrap_err().is_corrupt());
}

#[test]
fn test_truncated_before_char_table() {
    let bytes = sample_artifact();
    let cut = index_offset(&bytes) + 50;
    let artifact = write_temp(&bytes[..cut]);
    assert!(search(&artifact.path, "110101").unwrap_err().is_corrupt());
    assert!(decode_records(&bytes[..cut]).unwrap_err().is_corrupt());
}

#[test]
fn test_index_entry_outside_records() {
    let mut bytes = sample_artifact();
    let at = index_offset(&bytes);
    // province 11 pointed at byte 1, inside the header
    bytes[at..at + 3].copy_from_slice(&[0x16, 0x00, 0x01]);
    let err = search_in(&mut Cursor::new(bytes.clone()), "110101").unwrap_err();
    assert!(matches!(err, RegionError::CorruptArtifact(_)));
    assert!(ArtifactLayout::from_bytes(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_index_entry_at_wrong_province() {
    let mut bytes = sample_artifact();
    let at = index_offset(&bytes);
    // province 11 at its true offset, relabelled as province 10
    let entry = u32::from_be_bytes([0, bytes[at], bytes[at + 1], bytes[at + 2]]);
    let relabelled = (10 << 17) | (entry & 0x1FFFF);
    bytes[at..at + 3].copy_from_slice(&relabelled.to_be_bytes()[1..]);

    let err = search_in(&mut Cursor::new(bytes.clone()), "100101").unwrap_err();
    assert!(err.is_corrupt());
    assert!(ArtifactLayout::from_bytes(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_invalid_utf8_char_table() {
    let mut bytes = sample_artifact();
    let start = index_offset(&bytes) + 102;
    bytes[start] = 0xFF;
    let err = search_in(&mut Cursor::new(bytes), "110101").unwrap_err();
    assert!(err.is_corrupt());
}

#[test]
fn test_every_truncation_is_handled() {
    let bytes = sample_artifact();
    for cut in 0..bytes.len() {
        let damaged = &bytes[..cut];
        for code in PROBES {
            let _ = search_in(&mut Cursor::new(damaged), code);
        }
        assert!(decode_records(damaged).is_err(), "cut at {cut}");
    }
}

#[test]
fn test_bit_flips_never_panic() {
    let bytes = sample_artifact();
    for at in 0..bytes.len() {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut damaged = bytes.clone();
            damaged[at] ^= bit;
            for code in PROBES {
                let _ = search_in(&mut Cursor::new(&damaged), code);
            }
            let _ = decode_records(&damaged);
            let _ = ArtifactLayout::from_bytes(&damaged);
        }
    }
}
