//! Pack/search properties over generated region tables.
//!
//! - Round-trip: every packed row is found with its suffix and year
//! - Hierarchy: the chain is the concatenation of the ancestors
//! - The trie answers like the on-disk walk, for present and absent codes

use std::collections::BTreeMap;
use std::io::Cursor;

use proptest::prelude::*;
use region_cn::classify::REGION_TYPES;
use region_cn::{decode_records, encode_artifact, search_in, RegionTrie, SourceRecord};

// ============================================================================
// STRATEGIES
// ============================================================================

fn stem_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0x4E00u32..0x4E80, 1..=6)
        .prop_map(|cps| cps.into_iter().filter_map(char::from_u32).collect())
}

/// A stem plus one of the known type suffixes.
fn name_strategy() -> impl Strategy<Value = String> {
    (stem_strategy(), 0..REGION_TYPES.len())
        .prop_map(|(stem, i)| format!("{}{}", stem, REGION_TYPES[i].1))
}

fn row_strategy() -> impl Strategy<Value = (String, Option<u16>)> {
    (name_strategy(), prop::option::of(1981u16..=2043))
}

/// Province → city → counties, every level optional below the province.
type Tree = BTreeMap<u32, BTreeMap<u32, Vec<u32>>>;

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let counties = prop::collection::btree_set(1u32..=40, 0..5)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>());
    let cities = prop::collection::btree_map(1u32..=30, counties, 0..4);
    prop::collection::btree_map(11u32..=82, cities, 1..6)
}

/// Rows in file order, each with a generated name and optional year.
fn dataset_strategy() -> impl Strategy<Value = Vec<SourceRecord>> {
    tree_strategy().prop_flat_map(|tree| {
        let mut codes = Vec::new();
        for (province, cities) in &tree {
            codes.push(province * 10_000);
            for (city, counties) in cities {
                codes.push(province * 10_000 + city * 100);
                codes.extend(counties.iter().map(|county| province * 10_000 + city * 100 + county));
            }
        }
        let n = codes.len();
        prop::collection::vec(row_strategy(), n).prop_map(move |rows| {
            codes
                .iter()
                .zip(rows)
                .map(|(code, (name, year))| SourceRecord {
                    code: format!("{:06}", code),
                    name,
                    discard_year: year,
                })
                .collect()
        })
    })
}

fn expected_label(row: &SourceRecord) -> String {
    match row.discard_year {
        Some(year) => format!("{} ({}年废止)", row.name, year),
        None => row.name.clone(),
    }
}

// ============================================================================
// LOOKUP PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every row is found, labelled with its full name and year.
    #[test]
    fn prop_pack_search_roundtrip(rows in dataset_strategy()) {
        let bytes = encode_artifact(&rows, 1).unwrap();
        let mut reader = Cursor::new(&bytes);

        for row in &rows {
            let lookup = search_in(&mut reader, &row.code).unwrap();
            let expected = expected_label(row);
            let concatenated = lookup.ancestors.concat();
            prop_assert!(lookup.matched, "{} not matched", row.code);
            prop_assert_eq!(lookup.ancestors.last(), Some(&expected));
            prop_assert_eq!(lookup.discard_year, row.discard_year);
            prop_assert_eq!(&lookup.chain, &concatenated);
            prop_assert!(lookup.ancestors.len() <= 3);
        }
    }

    /// Property: decoding the whole table gives back every row in order.
    #[test]
    fn prop_decode_records_in_order(rows in dataset_strategy()) {
        let records = decode_records(&encode_artifact(&rows, 1).unwrap()).unwrap();
        prop_assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.code.to_string(), row.code.clone());
            prop_assert_eq!(record.full_name(), row.name.clone());
            prop_assert_eq!(record.discard_year, row.discard_year);
        }
    }

    /// Property: the trie matches the on-disk walk for any code of the
    /// artifact's provinces and for a foreign one.
    #[test]
    fn prop_trie_matches_search(
        rows in dataset_strategy(),
        probes in prop::collection::vec((0u32..=99, 0u32..=99), 1..20),
    ) {
        let bytes = encode_artifact(&rows, 1).unwrap();
        let records = decode_records(&bytes).unwrap();
        let trie = RegionTrie::from_records(&records);
        let mut reader = Cursor::new(&bytes);

        let provinces: Vec<&str> = rows.iter().map(|r| &r.code[..2]).collect();
        let mut codes: Vec<String> = rows.iter().map(|r| r.code.clone()).collect();
        for (i, (city, county)) in probes.iter().enumerate() {
            codes.push(format!("{}{:02}{:02}", provinces[i % provinces.len()], city, county));
        }
        codes.push("990101".to_string());

        for code in &codes {
            let on_disk = search_in(&mut reader, code).unwrap();
            let cached = trie.search(code).unwrap();
            prop_assert_eq!(cached, on_disk, "code {}", code);
        }
    }
}
