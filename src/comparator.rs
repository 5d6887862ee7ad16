//! C2 — Comparator.
//!
//! Given two raw values plus a compare-op and a rounding-flag tie-break,
//! decides truth per the column's `Kind`. The two `rf` tables (integral vs.
//! string) are reproduced as two distinct functions rather than unified —
//! that split is a deliberate quirk of the engine this was ported from, not
//! an accident to clean up.

use crate::kind::{Kind, TypeInfo, Width};
use crate::like;
use crate::word::Word;

/// Compare-op code, as carried in a compiled filter entry's `cop` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cop {
    Nil = 0,
    Lt = 1,
    Le = 2,
    Eq = 3,
    Ne = 4,
    Ge = 5,
    Gt = 6,
    Like = 7,
    NotLike = 8,
}

impl Cop {
    /// Decode a wire `cop` byte. `None` for anything unrecognized — the
    /// caller logs message id 34 and treats it as `Nil`.
    pub fn from_u8(v: u8) -> Option<Cop> {
        let cop = match v {
            0 => Cop::Nil,
            1 => Cop::Lt,
            2 => Cop::Le,
            3 => Cop::Eq,
            4 => Cop::Ne,
            5 => Cop::Ge,
            6 => Cop::Gt,
            7 => Cop::Like,
            8 => Cop::NotLike,
            _ => return None,
        };
        Some(cop)
    }
}

/// Decode a wire `cop` byte, logging and degrading to `Nil` (always false)
/// on an unrecognized value. Message id 34 in the diagnostic taxonomy.
pub fn decode_cop(v: u8) -> Cop {
    Cop::from_u8(v).unwrap_or_else(|| {
        log::warn!("unsupported cop byte {v:#x} (msg 34), comparison forced false");
        Cop::Nil
    })
}

/// `compare(kind, col_value, filter_value, cop, rf, type_info, is_null) -> bool`.
///
/// `is_null` means `col_value` is the column's NULL sentinel — this is how
/// `scan::scan_block` precomputes `null_matches` once via
/// `evaluator::matches(NULL_VALUE, filter, is_null=true)`; per-row NULL
/// cells reuse that precomputed answer and never call this function
/// directly with `is_null=true` themselves.
#[allow(clippy::too_many_arguments)]
pub fn compare(
    kind: Kind,
    col: Word,
    filter: Word,
    cop: Cop,
    rf: u8,
    type_info: &TypeInfo,
    is_null: bool,
) -> bool {
    if is_null {
        // NULL deviates from ordinary SQL three-valued logic here by design:
        // NE always holds against a NULL column value; every other op holds
        // only if the filter side is bit-identical to the same NULL
        // sentinel (a genuine NULL-vs-NULL comparison).
        return match cop {
            Cop::Ne => true,
            Cop::Nil => false,
            _ => col == filter,
        };
    }

    match kind {
        Kind::Default => {
            let (v1, v2) = (col.as_signed(), filter.as_signed());
            integral_rule(v1 < v2, v1 == v2, v1 > v2, cop, rf)
        }
        Kind::Unsigned => {
            let (v1, v2) = (col.as_unsigned(), filter.as_unsigned());
            integral_rule(v1 < v2, v1 == v2, v1 > v2, cop, rf)
        }
        Kind::Float => compare_float(col, filter, cop, rf),
        Kind::Text => compare_text(col, filter, cop, rf, type_info),
    }
}

fn compare_float(col: Word, filter: Word, cop: Cop, rf: u8) -> bool {
    match col.width() {
        Width::W4 => {
            let (v1, v2) = (col.as_f32() as f64, filter.as_f32() as f64);
            integral_rule(v1 < v2, v1 == v2, v1 > v2, cop, rf)
        }
        Width::W8 => {
            let (v1, v2) = (col.as_f64(), filter.as_f64());
            integral_rule(v1 < v2, v1 == v2, v1 > v2, cop, rf)
        }
        _ => {
            log::warn!("Float kind used at unsupported width {:?} (msg 34)", col.width());
            false
        }
    }
}

fn compare_text(col: Word, filter: Word, cop: Cop, rf: u8, type_info: &TypeInfo) -> bool {
    match cop {
        Cop::Like | Cop::NotLike => {
            let text = col.rtrim_str();
            let pattern = filter.rtrim_str();
            let hit = like::like_match(&pattern, &text, type_info);
            if cop == Cop::Like {
                hit
            } else {
                !hit
            }
        }
        _ if rf == 0 => {
            if type_info.is_bin_sort_no_pad() {
                let (v1, v2) = (col.swapped_unsigned(), filter.swapped_unsigned());
                integral_rule(v1 < v2, v1 == v2, v1 > v2, cop, 0)
            } else {
                let (s1, s2) = (
                    like::collate_key(&col.rtrim_str(), type_info),
                    like::collate_key(&filter.rtrim_str(), type_info),
                );
                integral_rule(s1 < s2, s1 == s2, s1 > s2, cop, 0)
            }
        }
        _ => {
            let (v1, v2) = (col.swapped_unsigned(), filter.swapped_unsigned());
            text_rf_rule(v1 < v2, v1 == v2, v1 > v2, cop, rf)
        }
    }
}

/// The integral (and float, and BinSort-fast-path text) `rf` tie-break
/// table from the source's `colCompare_<T>(val1, val2, COP, rf)`.
fn integral_rule(lt: bool, eq: bool, gt: bool, cop: Cop, rf: u8) -> bool {
    match cop {
        Cop::Nil => false,
        Cop::Lt => lt || (eq && (rf & 0x01 != 0)),
        Cop::Le => lt || (eq && (rf & 0x80 == 0)),
        Cop::Eq => eq && rf == 0,
        Cop::Ne => !eq || rf != 0,
        Cop::Ge => gt || (eq && (rf & 0x01 == 0)),
        Cop::Gt => gt || (eq && (rf & 0x80 != 0)),
        Cop::Like | Cop::NotLike => {
            log::warn!("LIKE cop used outside Text kind (msg 34)");
            false
        }
    }
}

/// The separate string-specific `rf` tie-break table from the source's
/// `colStrCompare_(val1, val2, COP, rf)`. Deliberately distinct from
/// `integral_rule` above — `LE`/`GT` never consult `rf` at all here, where
/// the integral table consults it for every op.
fn text_rf_rule(lt: bool, eq: bool, gt: bool, cop: Cop, rf: u8) -> bool {
    match cop {
        Cop::Nil => false,
        Cop::Lt => lt || (eq && rf != 0),
        Cop::Le => lt || eq,
        Cop::Eq => eq && rf == 0,
        Cop::Ne => !eq || rf != 0,
        Cop::Ge => gt || (eq && rf == 0),
        Cop::Gt => gt,
        Cop::Like | Cop::NotLike => {
            log::warn!("LIKE cop unsupported on the text rf-tie-break path (msg 34)");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Width;

    fn w4(v: i32) -> Word {
        Word::read(&v.to_ne_bytes(), Width::W4)
    }

    #[test]
    fn unsupported_cop_byte_logs_and_degrades_to_nil() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(decode_cop(0xAA), Cop::Nil);
    }

    #[test]
    fn lt_with_rf_tie_break() {
        // Scenario 2: block [5,5,7], filter (LT, rf=0x01, 5).
        assert!(compare(Kind::Default, w4(5), w4(5), Cop::Lt, 0x01, &TypeInfo::default(), false));
        assert!(!compare(Kind::Default, w4(7), w4(5), Cop::Lt, 0x01, &TypeInfo::default(), false));
    }

    #[test]
    fn rf_zero_reduces_to_ordinary_relational_ops() {
        assert!(compare(Kind::Default, w4(3), w4(5), Cop::Lt, 0, &TypeInfo::default(), false));
        assert!(!compare(Kind::Default, w4(5), w4(5), Cop::Lt, 0, &TypeInfo::default(), false));
        assert!(compare(Kind::Default, w4(5), w4(5), Cop::Eq, 0, &TypeInfo::default(), false));
    }

    #[test]
    fn nan_compares_unequal_except_ne() {
        let nan = Word::read(&f64::NAN.to_bits().to_ne_bytes(), Width::W8);
        let one = Word::read(&1.0f64.to_bits().to_ne_bytes(), Width::W8);
        assert!(!compare(Kind::Float, nan, one, Cop::Eq, 0, &TypeInfo::default(), false));
        assert!(!compare(Kind::Float, nan, one, Cop::Lt, 0, &TypeInfo::default(), false));
        assert!(!compare(Kind::Float, nan, one, Cop::Gt, 0, &TypeInfo::default(), false));
        assert!(compare(Kind::Float, nan, one, Cop::Ne, 0, &TypeInfo::default(), false));
    }

    #[test]
    fn text_binsort_nopad_fast_path() {
        // Scenario 6: W=8, "apple\0\0\0" vs "banana\0\0", GT, rf=0.
        let apple = Word::read(b"apple\0\0\0", Width::W8);
        let banana = Word::read(b"banana\0\0", Width::W8);
        let ti = TypeInfo::BINARY;
        assert!(compare(Kind::Text, banana, apple, Cop::Gt, 0, &ti, false));
        assert!(!compare(Kind::Text, apple, banana, Cop::Gt, 0, &ti, false));
    }

    #[test]
    fn text_rf_table_differs_from_integral_table() {
        // LE under the text rf table never consults rf (always lt||eq);
        // under the integral table it does (rf & 0x80 == 0 gates the eq case).
        assert!(integral_rule(false, true, false, Cop::Le, 0x80) == false);
        assert!(text_rf_rule(false, true, false, Cop::Le, 0x80));
    }

    #[test]
    fn null_is_not_equal_to_concrete_filter_but_ne_holds() {
        let null_sentinel = w4(i32::MIN);
        let concrete = w4(15);
        assert!(!compare(Kind::Default, null_sentinel, concrete, Cop::Eq, 0, &TypeInfo::default(), true));
        assert!(compare(Kind::Default, null_sentinel, concrete, Cop::Ne, 0, &TypeInfo::default(), true));
    }
}
