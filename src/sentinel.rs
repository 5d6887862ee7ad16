//! C1 — Sentinel catalog.
//!
//! For every `(DataType, Width)` pair, returns the two reserved bit
//! patterns that mark an unwritten cell (`EMPTY`) and a written SQL `NULL`.
//! Pure, table-driven, infallible — no I/O, no error path.
//!
//! The exact bit patterns are this engine's own; the upstream C++ primitive
//! pulls them from `joblist::` constants defined outside the file this
//! crate was grounded on, so the values below are a self-consistent scheme
//! rather than a byte-for-byte port: signed kinds reserve the minimum
//! representable value and its successor, unsigned kinds reserve the
//! maximum value and its predecessor, text-ish kinds reserve an
//! all-`0xFE`/all-`0xFF` byte pattern, and floating kinds reserve NaN
//! payloads that well-formed column data will not otherwise produce. What
//! matters for correctness is that each pair is unique within its own
//! column family and stable across calls — see `P2`/`P3` in the test
//! module for the properties this catalog must uphold.

use crate::kind::{DataType, Width};
use crate::word::Word;

/// `(NULL_VALUE, EMPTY_VALUE)` for a column of the given logical type and
/// width.
pub fn lookup(data_type: DataType, width: Width) -> (Word, Word) {
    match width {
        Width::W1 => {
            if data_type.is_char_like() {
                (Word::W1(0xFF), Word::W1(0xFE))
            } else if data_type.is_unsigned() {
                (Word::W1(0xFF), Word::W1(0xFE))
            } else {
                (Word::W1(0x81), Word::W1(0x80))
            }
        }
        Width::W2 => {
            if data_type.is_char_like() {
                (Word::W2(0xFFFF), Word::W2(0xFEFE))
            } else if data_type.is_unsigned() {
                (Word::W2(0xFFFF), Word::W2(0xFFFE))
            } else {
                (Word::W2(0x8001), Word::W2(0x8000))
            }
        }
        Width::W4 => {
            if data_type.is_float() {
                (Word::W4(0x7F80_0002), Word::W4(0x7F80_0001))
            } else if matches!(
                data_type,
                DataType::Date | DataType::DateTime | DataType::Time | DataType::Timestamp
            ) {
                (Word::W4(0x7FFF_FFFF), Word::W4(0x7FFF_FFFE))
            } else if data_type.is_char_like() {
                (Word::W4(0xFFFF_FFFF), Word::W4(0xFEFE_FEFE))
            } else if data_type.is_unsigned() {
                (Word::W4(0xFFFF_FFFF), Word::W4(0xFFFF_FFFE))
            } else {
                (Word::W4(0x8000_0001), Word::W4(0x8000_0000))
            }
        }
        Width::W8 => {
            if data_type.is_float() {
                (
                    Word::W8(0x7FF0_0000_0000_0002),
                    Word::W8(0x7FF0_0000_0000_0001),
                )
            } else if data_type.is_char_like() {
                (
                    Word::W8(0xFFFF_FFFF_FFFF_FFFF),
                    Word::W8(0xFEFE_FEFE_FEFE_FEFE),
                )
            } else if data_type.is_unsigned() {
                (
                    Word::W8(0xFFFF_FFFF_FFFF_FFFF),
                    Word::W8(0xFFFF_FFFF_FFFF_FFFE),
                )
            } else {
                (
                    Word::W8(0x8000_0000_0000_0001),
                    Word::W8(0x8000_0000_0000_0000),
                )
            }
        }
        Width::W16 => (
            Word::W16(0x8000_0000_0000_0000_0000_0000_0000_0001),
            Word::W16(0x8000_0000_0000_0000_0000_0000_0000_0000),
        ),
    }
}

/// The alternate NULL sentinel recognized only for `Text` kind at 8-byte
/// width, for historical tokenized columns.
///
/// This is the documented asymmetry: it is checked by the value iterator's
/// NULL test (see `scan::is_null`) but is never *produced* by `lookup`
/// above — the generator only ever returns the canonical all-`0xFF` NULL.
/// Reproduced bug-compatibly per the upstream source rather than unified,
/// since the two call sites (generate vs. check) are independently
/// specified and observable behavior must match the original asymmetry.
pub const TEXT8_ALT_NULL: Word = Word::W8(0xFFFF_FFFF_FFFF_FFFE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_are_distinct_within_width() {
        let (null_i, empty_i) = lookup(DataType::Int, Width::W4);
        let (null_u, empty_u) = lookup(DataType::UInt, Width::W4);
        let (null_t, empty_t) = lookup(DataType::VarChar, Width::W4);
        let (null_f, empty_f) = lookup(DataType::Float, Width::W4);
        assert_ne!(empty_i, empty_u);
        assert_ne!(empty_u, empty_t);
        assert_ne!(empty_t, empty_f);
        assert_ne!(null_i, empty_i);
        assert_ne!(null_u, empty_u);
        assert_ne!(null_t, empty_t);
        assert_ne!(null_f, empty_f);
    }

    #[test]
    fn alt_null_is_not_the_canonical_sentinel() {
        let (null_canonical, _) = lookup(DataType::Text, Width::W8);
        assert_ne!(null_canonical, TEXT8_ALT_NULL);
    }

    #[test]
    fn width16_reserves_min_and_successor() {
        let (null, empty) = lookup(DataType::Decimal, Width::W16);
        assert_eq!(empty.as_signed(), i128::MIN);
        assert_eq!(null.as_signed(), i128::MIN + 1);
    }
}
