//! Bit cursor behaviour at every boundary width.

use region_cn::binary::{
    pack_symbols, packed_len, unpack_symbols, BitReader, BitWriter, MAX_YEAR_DELTA, SYMBOL_BITS,
};

#[test]
fn test_boundary_widths_after_every_lead() {
    for width in [4u8, 8, 12, 16, 20] {
        for lead in 0u8..8 {
            let mut writer = BitWriter::new();
            writer.write_bits(0b1, lead.max(1));
            let value = (1u32 << width) - 2;
            writer.write_bits(value, width);
            writer.write_bits(1, 1);

            let bytes = writer.into_bytes();
            let mut reader = BitReader::new(&bytes);
            reader.read_bits(lead.max(1)).unwrap();
            assert_eq!(reader.read_bits(width), Some(value), "width {} lead {}", width, lead);
            assert_eq!(reader.read_bits(1), Some(1));
        }
    }
}

#[test]
fn test_two_symbols_fill_three_bytes() {
    assert_eq!(packed_len(2, false), 3);
    assert_eq!(packed_len(1, false), 2);
    assert_eq!(packed_len(1, true), 3);
    assert_eq!(packed_len(2, true), 4);
    assert_eq!(pack_symbols(&[0x040, 0xFFF], None), vec![0x04, 0x0F, 0xFF]);
}

#[test]
fn test_discard_year_1999_is_delta_19() {
    let packed = pack_symbols(&[100, 200, 300], Some(19));
    let (symbols, year) = unpack_symbols(&packed).unwrap();
    assert_eq!(symbols, vec![100, 200, 300]);
    assert_eq!(year.map(|d| 1980 + u16::from(d)), Some(1999));
}

#[test]
fn test_year_never_reads_as_symbol() {
    // the largest delta right after an odd and an even symbol count
    for n in [1usize, 2] {
        let symbols = vec![4095u16; n];
        let packed = pack_symbols(&symbols, Some(MAX_YEAR_DELTA));
        let mut reader = BitReader::new(&packed);
        for _ in 0..n {
            reader.read_bits(SYMBOL_BITS).unwrap();
        }
        let tail = reader.remaining();
        assert!(tail == 8 || tail == 12, "tail of {} bits", tail);
        assert_eq!(reader.read_bits(tail as u8), Some(u32::from(MAX_YEAR_DELTA)));
    }
}
