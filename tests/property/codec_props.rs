//! Bit packing and record codec properties.
//!
//! - Bit writer/reader agree for any value at any offset
//! - Symbol packing is reversible for 1..=40 symbols, with and without a year
//! - Every emitted payload fits the record length byte it is framed with

use proptest::prelude::*;
use region_cn::binary::{
    encode_record, pack_symbols, packed_len, unpack_symbols, BitReader, BitWriter, RecordFrame,
    MAX_YEAR_DELTA,
};
use region_cn::util::char_table::{CharTable, FIRST_SYMBOL};
use region_cn::{RegionCode, RegionRecord, RegionType};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Symbol codes from the assignable range.
fn symbols_strategy(max_len: usize) -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(FIRST_SYMBOL..4096u16, 1..=max_len)
}

fn year_strategy() -> impl Strategy<Value = Option<u8>> {
    prop::option::of(1u8..=MAX_YEAR_DELTA)
}

/// Names drawn from a small CJK alphabet.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0x4E00u32..0x4E80, 1..=30)
        .prop_map(|cps| cps.into_iter().filter_map(char::from_u32).collect())
}

// ============================================================================
// BIT CURSOR PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: a value written after any lead is read back unchanged.
    #[test]
    fn prop_bits_roundtrip(lead in 0u8..16, width in 1u8..=32, raw: u32) {
        let value = if width == 32 { raw } else { raw & ((1u32 << width) - 1) };
        let mut writer = BitWriter::new();
        writer.write_bits(0, lead);
        writer.write_bits(value, width);
        prop_assert_eq!(writer.bit_len(), lead as usize + width as usize);

        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        prop_assert_eq!(reader.read_bits(lead), Some(0));
        prop_assert_eq!(reader.read_bits(width), Some(value));
        prop_assert!(reader.remaining() < 8);
    }
}

// ============================================================================
// SYMBOL PACKING PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: symbols and year survive packing.
    #[test]
    fn prop_symbols_roundtrip(symbols in symbols_strategy(40), year in year_strategy()) {
        let packed = pack_symbols(&symbols, year);
        prop_assert_eq!(packed.len(), packed_len(symbols.len(), year.is_some()));

        let (decoded, decoded_year) = unpack_symbols(&packed).unwrap();
        prop_assert_eq!(decoded, symbols);
        prop_assert_eq!(decoded_year, year);
    }

    /// Property: a frame decodes to the record it was encoded from.
    #[test]
    fn prop_record_roundtrip(
        code in 0u32..=999_999,
        name in name_strategy(),
        type_value in 0u8..16,
        year in prop::option::of(1981u16..=2043),
    ) {
        let table = CharTable::from_names([name.as_str()]).unwrap();
        let record = RegionRecord {
            code: RegionCode::from_u32(code).unwrap(),
            region_type: RegionType::from_u8(type_value).unwrap(),
            name,
            discard_year: year,
        };

        let mut buf = Vec::new();
        let len = encode_record(&record, &table, &mut buf).unwrap();
        prop_assert_eq!(len, buf.len());

        let frame = RecordFrame::parse(&buf).unwrap();
        prop_assert_eq!(frame.len, len);
        prop_assert_eq!(frame.decode(&table).unwrap(), record);
    }
}
