//! Name cleaning applied before classification.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Decoration marks that annotate a name in source listings but are never
/// part of it. The status asterisk flags units whose name changed.
pub const DECORATION_MARKS: &[char] = &['*', '＊'];

/// Clean a raw region name: drop decoration marks and whitespace, then
/// compose to NFC so visually identical names share dictionary codes.
///
/// "崇文区*" → "崇文区", " 北京市 " → "北京市"
#[cfg(feature = "unicode-normalization")]
pub fn clean_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DECORATION_MARKS.contains(c) && !c.is_whitespace())
        .nfc()
        .collect()
}

/// Cleaning without unicode-normalization: marks and whitespace only.
#[cfg(not(feature = "unicode-normalization"))]
pub fn clean_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DECORATION_MARKS.contains(c) && !c.is_whitespace())
        .collect()
}
