//! C3 — Filter compiler.
//!
//! Turns the wire-format filter (a flat list of `(cop, rf, value)` entries
//! plus a boolean combinator) into a `CompiledFilter` carrying a dispatch
//! `FilterMode`. The compiled form is immutable and cacheable across every
//! block scanned for one column in one query.

use std::collections::HashSet;

use crate::comparator::Cop;
use crate::word::Word;

/// Boolean combinator across multiple filter elements, from the request
/// header's `BOP` field (`0=None, 1=And, 2=Or, 3=Xor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bop {
    None,
    And,
    Or,
    Xor,
}

impl Bop {
    pub fn from_u8(v: u8) -> Bop {
        match v {
            1 => Bop::And,
            2 => Bop::Or,
            3 => Bop::Xor,
            _ => Bop::None,
        }
    }
}

/// One decoded `(cop, rf, value)` triple.
#[derive(Debug, Clone, Copy)]
pub struct FilterEntry {
    pub cop: Cop,
    pub rf: u8,
    pub value: Word,
}

/// Dispatch mode selected by `compile`, mirroring the source's
/// `ColumnFilterMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    AlwaysTrue,
    Single,
    AnyTrue,
    AllTrue,
    XorAll,
    OneOfArray,
    NoneOfArray,
    OneOfSet,
    NoneOfSet,
}

/// Below this many entries, `OneOfArray`/`NoneOfArray` scan linearly;
/// above it, `OneOfSet`/`NoneOfSet` materialize a hashed set instead. A
/// per-call knob rather than a hardcoded literal, so callers with unusual
/// filter-size distributions can override it; defaults to a threshold in
/// the same ballpark as this engine lineage's other small-collection
/// cutoffs.
pub const DEFAULT_SET_THRESHOLD: usize = 16;

/// Compiled, immutable filter for one column in one query.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    pub mode: FilterMode,
    pub entries: Vec<FilterEntry>,
    pub set: Option<HashSet<Word>>,
}

/// Compile a filter, choosing `mode` by the priority order in the design:
/// empty → single → large uniform EQ/Or or NE/And → set; small uniform →
/// array; otherwise the combinator maps directly to a boolean-fold mode.
pub fn compile(entries: Vec<FilterEntry>, bop: Bop) -> CompiledFilter {
    compile_with_threshold(entries, bop, DEFAULT_SET_THRESHOLD)
}

pub fn compile_with_threshold(
    entries: Vec<FilterEntry>,
    bop: Bop,
    set_threshold: usize,
) -> CompiledFilter {
    let count = entries.len();
    let all_eq = count > 0 && entries.iter().all(|e| e.cop == Cop::Eq);
    let all_ne = count > 0 && entries.iter().all(|e| e.cop == Cop::Ne);
    // `None` is treated as `Or` for the purposes of mode selection.
    let effective_bop = if bop == Bop::None { Bop::Or } else { bop };

    let mode = if count == 0 {
        FilterMode::AlwaysTrue
    } else if count == 1 {
        FilterMode::Single
    } else if all_eq && effective_bop == Bop::Or && count > set_threshold {
        FilterMode::OneOfSet
    } else if all_ne && effective_bop == Bop::And && count > set_threshold {
        FilterMode::NoneOfSet
    } else if all_eq && effective_bop == Bop::Or {
        FilterMode::OneOfArray
    } else if all_ne && effective_bop == Bop::And {
        FilterMode::NoneOfArray
    } else {
        match effective_bop {
            Bop::Or => FilterMode::AnyTrue,
            Bop::And => FilterMode::AllTrue,
            Bop::Xor => FilterMode::XorAll,
            Bop::None => unreachable!("None was normalized to Or above"),
        }
    };

    let set = match mode {
        FilterMode::OneOfSet | FilterMode::NoneOfSet => {
            Some(entries.iter().map(|e| e.value).collect())
        }
        _ => None,
    };

    CompiledFilter {
        mode,
        entries,
        set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Width;

    fn entry(cop: Cop, v: i32) -> FilterEntry {
        FilterEntry {
            cop,
            rf: 0,
            value: Word::read(&v.to_ne_bytes(), Width::W4),
        }
    }

    #[test]
    fn empty_filter_is_always_true() {
        let f = compile(vec![], Bop::None);
        assert_eq!(f.mode, FilterMode::AlwaysTrue);
    }

    #[test]
    fn single_entry_is_single_regardless_of_bop() {
        let f = compile(vec![entry(Cop::Lt, 5)], Bop::And);
        assert_eq!(f.mode, FilterMode::Single);
    }

    #[test]
    fn small_eq_or_is_one_of_array() {
        let f = compile(vec![entry(Cop::Eq, 2), entry(Cop::Eq, 5)], Bop::Or);
        assert_eq!(f.mode, FilterMode::OneOfArray);
        assert!(f.set.is_none());
    }

    #[test]
    fn large_eq_or_is_one_of_set() {
        let entries: Vec<_> = (0..20).map(|i| entry(Cop::Eq, i)).collect();
        let f = compile_with_threshold(entries, Bop::Or, 16);
        assert_eq!(f.mode, FilterMode::OneOfSet);
        assert_eq!(f.set.as_ref().unwrap().len(), 20);
    }

    #[test]
    fn small_ne_and_is_none_of_array() {
        let f = compile(vec![entry(Cop::Ne, 2), entry(Cop::Ne, 5)], Bop::And);
        assert_eq!(f.mode, FilterMode::NoneOfArray);
    }

    #[test]
    fn mixed_cops_fall_back_to_combinator() {
        let f = compile(vec![entry(Cop::Ge, 5), entry(Cop::Le, 8)], Bop::And);
        assert_eq!(f.mode, FilterMode::AllTrue);
        let f = compile(vec![entry(Cop::Lt, 5), entry(Cop::Gt, 8)], Bop::Or);
        assert_eq!(f.mode, FilterMode::AnyTrue);
        let f = compile(vec![entry(Cop::Lt, 5), entry(Cop::Gt, 8)], Bop::Xor);
        assert_eq!(f.mode, FilterMode::XorAll);
    }

    #[test]
    fn none_combinator_behaves_like_or() {
        let f = compile(vec![entry(Cop::Eq, 2), entry(Cop::Eq, 5)], Bop::None);
        assert_eq!(f.mode, FilterMode::OneOfArray);
    }
}
