//! Suffix classification over real region names.

use region_cn::{classify, RegionType};

use crate::common::sample_records;

#[test]
fn test_every_sample_name_has_a_type() {
    for record in sample_records() {
        let (stem, region_type) = classify(&record.name);
        assert!(!stem.is_empty(), "{} stems to nothing", record.name);
        assert_ne!(region_type, RegionType::Other, "{} has no suffix", record.name);
        assert_eq!(format!("{}{}", stem, region_type.label()), record.name);
    }
}

#[test]
fn test_ethnic_suffixes_win_over_generic_ones() {
    let cases = [
        ("丰宁满族自治县", "丰宁", RegionType::ManchuAutonomousCounty),
        ("围场满族蒙古族自治县", "围场满族", RegionType::MongolAutonomousCounty),
        ("石柱土家族自治县", "石柱", RegionType::TujiaAutonomousCounty),
        ("秀山土家族苗族自治县", "秀山土家族", RegionType::MiaoAutonomousCounty),
        ("黄南藏族自治州", "黄南", RegionType::TibetanAutonomousPrefecture),
        ("西藏自治区", "西藏", RegionType::AutonomousRegion),
    ];
    for (name, stem, region_type) in cases {
        assert_eq!(classify(name), (stem, region_type), "{}", name);
    }
}

#[test]
fn test_suffix_only_inside_name_is_ignored() {
    // 州 appears mid-name but the name ends in 市
    assert_eq!(classify("州市"), ("州", RegionType::City));
    assert_eq!(classify("县城"), ("县城", RegionType::Other));
}
