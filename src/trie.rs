// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory read-through cache for repeated lookups.
//!
//! One full scan of the artifact fills a trie keyed by two-digit code
//! segments: province, city, county. `110101` lives at `11 → 01 → 01`,
//! `110100` at `11 → 01`, `110000` at `11`. Trailing `00` pairs are dropped,
//! so a city record sits exactly where its counties branch off. A node that
//! only exists to reach a deeper code carries no label.
//!
//! `RegionTrie::search` answers like [`search`](crate::search::search) does
//! for every code the artifact holds, without touching the file again.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::table::read_records;
use crate::types::{Lookup, RegionCode, RegionRecord};

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<u8, TrieNode>,
    label: Option<String>,
    discard_year: Option<u16>,
}

/// Region labels keyed by code segments.
#[derive(Debug, Clone, Default)]
pub struct RegionTrie {
    root: TrieNode,
    len: usize,
}

/// The significant two-digit segments of a code, most general first.
fn segments(code: RegionCode) -> Vec<u8> {
    let value = code.get();
    let mut parts = vec![
        (value / 10_000) as u8,
        (value / 100 % 100) as u8,
        (value % 100) as u8,
    ];
    while parts.len() > 1 && parts.last() == Some(&0) {
        parts.pop();
    }
    parts
}

impl RegionTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded records.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RegionRecord>,
    {
        let mut trie = Self::new();
        for record in records {
            trie.insert(record);
        }
        trie
    }

    /// Scan the artifact at `path` once and build the trie.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let records = read_records(path)?;
        let trie = Self::from_records(&records);
        log::debug!("trie holds {} regions", trie.len());
        Ok(trie)
    }

    /// Insert one record. A repeated code keeps its first label.
    pub fn insert(&mut self, record: &RegionRecord) {
        let mut node = &mut self.root;
        for segment in segments(record.code) {
            node = node.children.entry(segment).or_default();
        }
        if node.label.is_none() {
            node.label = Some(record.label());
            node.discard_year = record.discard_year;
            self.len += 1;
        }
    }

    /// Ancestor chain for `code`, same shape as the on-disk lookup.
    pub fn search(&self, code: &str) -> Result<Lookup> {
        let target = RegionCode::parse(code)?;
        let path = segments(target);
        let mut result = Lookup::not_found(target.to_string());

        let mut node = &self.root;
        for (depth, segment) in path.iter().enumerate() {
            let Some(child) = node.children.get(segment) else {
                break;
            };
            node = child;
            if let Some(label) = &node.label {
                result.push(label.clone());
                if depth + 1 == path.len() {
                    result.matched = true;
                    result.discard_year = node.discard_year;
                }
            }
        }
        Ok(result)
    }

    /// Regions stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
