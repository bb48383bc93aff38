//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::PathBuf;

use region_cn::{encode_artifact, load_dataset, pack, SourceRecord};
use tempfile::TempDir;

// ============================================================================
// FIXTURES
// ============================================================================

/// Realistic dataset checked into the repository.
pub const SAMPLE_DATASET: &str = "data/sample.json";

/// Build stamp used by fixtures that do not care about it.
pub const TEST_VERSION: u32 = 2024092911;

/// Rows of the sample dataset.
pub fn sample_records() -> Vec<SourceRecord> {
    load_dataset(SAMPLE_DATASET)
        .expect("Failed to load sample dataset")
        .records
}

/// The sample dataset packed in memory.
pub fn sample_artifact() -> Vec<u8> {
    encode_artifact(&sample_records(), TEST_VERSION).expect("Failed to encode sample dataset")
}

/// Province, city and county of Beijing's Dongcheng district.
pub fn hierarchy_records() -> Vec<SourceRecord> {
    vec![
        ("110000", "北京市").into(),
        ("110100", "市辖区").into(),
        ("110101", "东城区").into(),
    ]
}

// ============================================================================
// ON-DISK ARTIFACTS
// ============================================================================

/// A packed artifact in a fresh temporary directory.
///
/// Keep the `TempDir` alive for as long as the path is used.
pub struct TempArtifact {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn pack_temp(records: &[SourceRecord]) -> TempArtifact {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("region.dat");
    pack(&path, records, TEST_VERSION).expect("Failed to pack artifact");
    TempArtifact { dir, path }
}

/// Write raw bytes as an artifact file.
pub fn write_temp(bytes: &[u8]) -> TempArtifact {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("region.dat");
    std::fs::write(&path, bytes).expect("Failed to write artifact");
    TempArtifact { dir, path }
}
