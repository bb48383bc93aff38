// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dataset files consumed by `region-cn pack`.
//!
//! ```json
//! { "version": 2024092911,
//!   "regions": [["110000", "北京市"], ["110103", "崇文区", 2010]] }
//! ```
//!
//! A bare array of rows is accepted too. The discard year may be a number or
//! a numeric string; an empty string means the unit is still in use.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::types::SourceRecord;

/// A parsed dataset: rows in file order plus the optional build stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub version: Option<u32>,
    pub records: Vec<SourceRecord>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum DatasetFile {
    Object {
        #[serde(default)]
        version: Option<u32>,
        regions: Vec<RawRecord>,
    },
    Rows(Vec<RawRecord>),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawRecord {
    Pair(String, String),
    Triple(String, String, RawYear),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawYear {
    Number(u16),
    Text(String),
}

impl RawYear {
    fn resolve(self, code: &str) -> std::result::Result<Option<u16>, serde_json::Error> {
        match self {
            RawYear::Number(year) => Ok(Some(year)),
            RawYear::Text(text) if text.trim().is_empty() => Ok(None),
            RawYear::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                <serde_json::Error as serde::de::Error>::custom(format!(
                    "region {}: discard year {:?} is not a number",
                    code, text
                ))
            }),
        }
    }
}

impl TryFrom<RawRecord> for SourceRecord {
    type Error = serde_json::Error;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, Self::Error> {
        Ok(match raw {
            RawRecord::Pair(code, name) => SourceRecord::new(code, name),
            RawRecord::Triple(code, name, year) => {
                let discard_year = year.resolve(&code)?;
                SourceRecord {
                    code,
                    name,
                    discard_year,
                }
            }
        })
    }
}

/// Parse a dataset from JSON text.
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    let (version, rows) = match serde_json::from_str(json)? {
        DatasetFile::Object { version, regions } => (version, regions),
        DatasetFile::Rows(rows) => (None, rows),
    };
    let records = rows
        .into_iter()
        .map(SourceRecord::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Dataset { version, records })
}

/// Read and parse a dataset file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let dataset = parse_dataset(&json)?;
    log::debug!(
        "loaded {} rows from {}",
        dataset.records.len(),
        path.display()
    );
    Ok(dataset)
}
