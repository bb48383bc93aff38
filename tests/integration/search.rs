//! Lookups against the packed sample dataset.

use region_cn::{read_version, search, RegionError, RegionTrie, SourceRecord};

use crate::common::{hierarchy_records, pack_temp, sample_records, TEST_VERSION};

#[test]
fn test_hierarchy_accumulation() {
    let artifact = pack_temp(&hierarchy_records());
    let lookup = search(&artifact.path, "110101").unwrap();
    assert!(lookup.matched);
    assert_eq!(lookup.ancestors, vec!["北京市", "市辖区", "东城区"]);
    assert_eq!(lookup.chain, "北京市市辖区东城区");
}

#[test]
fn test_three_level_chain_with_ethnic_suffix() {
    let artifact = pack_temp(&sample_records());
    let (chain, ancestors) = search(&artifact.path, "530925").unwrap().into_pair();
    assert_eq!(chain, "云南省临沧市双江拉祜族佤族布朗族傣族自治县");
    assert_eq!(ancestors, vec!["云南省", "临沧市", "双江拉祜族佤族布朗族傣族自治县"]);
}

#[test]
fn test_discarded_county() {
    let artifact = pack_temp(&sample_records());
    let lookup = search(&artifact.path, "110103").unwrap();
    assert_eq!(lookup.chain, "北京市市辖区崇文区 (2010年废止)");
    assert_eq!(lookup.discard_year, Some(2010));

    let lookup = search(&artifact.path, "632321").unwrap();
    assert_eq!(lookup.ancestors, vec!["青海省", "黄南藏族自治州", "同仁县 (2020年废止)"]);
}

#[test]
fn test_codes_without_city_record() {
    let artifact = pack_temp(&sample_records());
    // 500240 has no 500200 parent in the sample
    let lookup = search(&artifact.path, "500240").unwrap();
    assert!(lookup.matched);
    assert_eq!(lookup.ancestors, vec!["重庆市", "石柱土家族自治县"]);

    let lookup = search(&artifact.path, "500241").unwrap();
    assert_eq!(lookup.chain, "重庆市秀山土家族苗族自治县");
}

#[test]
fn test_province_and_city_level_codes() {
    let artifact = pack_temp(&sample_records());
    assert_eq!(search(&artifact.path, "150000").unwrap().chain, "内蒙古自治区");
    assert_eq!(search(&artifact.path, "152900").unwrap().chain, "内蒙古自治区阿拉善盟");
    assert_eq!(
        search(&artifact.path, "152921").unwrap().chain,
        "内蒙古自治区阿拉善盟阿拉善左旗"
    );
}

#[test]
fn test_missing_province_is_empty_not_error() {
    let artifact = pack_temp(&sample_records());
    let lookup = search(&artifact.path, "710000").unwrap();
    assert!(lookup.is_empty());
    assert_eq!(lookup.into_pair(), (String::new(), Vec::<String>::new()));
}

#[test]
fn test_partial_match_on_absent_leaf() {
    let artifact = pack_temp(&sample_records());

    let lookup = search(&artifact.path, "130199").unwrap();
    assert!(!lookup.matched);
    assert_eq!(lookup.ancestors, vec!["河北省", "石家庄市"]);

    // no 540200 city, so only the province is collected
    let lookup = search(&artifact.path, "540201").unwrap();
    assert!(!lookup.matched);
    assert_eq!(lookup.ancestors, vec!["西藏自治区"]);
}

#[test]
fn test_invalid_code_format() {
    let artifact = pack_temp(&sample_records());
    for code in ["1101", "1101010", "11010x", ""] {
        assert!(matches!(
            search(&artifact.path, code),
            Err(RegionError::InvalidCodeFormat { .. })
        ));
    }
}

#[test]
fn test_invalid_code_checked_before_open() {
    assert!(matches!(
        search("does/not/exist.dat", "1101"),
        Err(RegionError::InvalidCodeFormat { .. })
    ));
    assert!(matches!(
        search("does/not/exist.dat", "110101"),
        Err(RegionError::Io(_))
    ));
}

#[test]
fn test_province_blocks_out_of_order() {
    let rows: Vec<SourceRecord> = vec![
        ("130000", "河北省").into(),
        ("130100", "石家庄市").into(),
        ("130102", "长安区").into(),
        ("110000", "北京市").into(),
        ("110101", "东城区").into(),
    ];
    let artifact = pack_temp(&rows);

    let lookup = search(&artifact.path, "130102").unwrap();
    assert_eq!(lookup.chain, "河北省石家庄市长安区");
    let lookup = search(&artifact.path, "110101").unwrap();
    assert!(lookup.matched);
    assert_eq!(lookup.ancestors, vec!["北京市", "东城区"]);

    let trie = RegionTrie::load(&artifact.path).unwrap();
    for row in &rows {
        assert_eq!(trie.search(&row.code).unwrap(), search(&artifact.path, &row.code).unwrap());
    }
}

#[test]
fn test_version_stamp() {
    let artifact = pack_temp(&sample_records());
    assert_eq!(read_version(&artifact.path).unwrap(), TEST_VERSION);
}

#[test]
fn test_trie_agrees_with_file_for_every_row() {
    let rows = sample_records();
    let artifact = pack_temp(&rows);
    let trie = RegionTrie::load(&artifact.path).unwrap();
    assert_eq!(trie.len(), rows.len());

    for row in &rows {
        assert_eq!(
            trie.search(&row.code).unwrap(),
            search(&artifact.path, &row.code).unwrap(),
            "code {}",
            row.code
        );
    }
}
