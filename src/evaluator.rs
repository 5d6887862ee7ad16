//! C5 — Filter evaluator.
//!
//! Applies a `CompiledFilter` to one value, short-circuiting per
//! combinator. This is the only place the filter's `mode` is inspected at
//! scan time — the compiler (C3) already paid for mode selection once.

use crate::comparator::{compare, Cop};
use crate::filter::{CompiledFilter, FilterMode};
use crate::kind::{Kind, TypeInfo};
use crate::word::Word;

/// `matches(value, compiled_filter, is_null) -> bool`.
///
/// `is_null` means `value` is the column's NULL sentinel. For
/// `NoneOfArray`/`NoneOfSet` this short-circuits to `false` directly
/// (NULLs never participate in an exclusion list); every other mode folds
/// `is_null` into each underlying `compare` call, which applies the
/// NULL–NULL rule from the comparator.
pub fn matches(
    value: Word,
    filter: &CompiledFilter,
    is_null: bool,
    kind: Kind,
    type_info: &TypeInfo,
) -> bool {
    match filter.mode {
        FilterMode::AlwaysTrue => true,
        FilterMode::Single => {
            let e = &filter.entries[0];
            compare(kind, value, e.value, e.cop, e.rf, type_info, is_null)
        }
        FilterMode::AnyTrue => filter
            .entries
            .iter()
            .any(|e| compare(kind, value, e.value, e.cop, e.rf, type_info, is_null)),
        FilterMode::AllTrue => filter
            .entries
            .iter()
            .all(|e| compare(kind, value, e.value, e.cop, e.rf, type_info, is_null)),
        FilterMode::XorAll => filter.entries.iter().fold(false, |acc, e| {
            acc ^ compare(kind, value, e.value, e.cop, e.rf, type_info, is_null)
        }),
        FilterMode::OneOfArray => filter
            .entries
            .iter()
            .any(|e| compare(kind, value, e.value, Cop::Eq, e.rf, type_info, is_null)),
        FilterMode::NoneOfArray => {
            if is_null {
                return false;
            }
            filter
                .entries
                .iter()
                .all(|e| compare(kind, value, e.value, Cop::Ne, e.rf, type_info, is_null))
        }
        FilterMode::OneOfSet => {
            filter.set.as_ref().is_some_and(|set| set.contains(&value))
        }
        FilterMode::NoneOfSet => {
            if is_null {
                return false;
            }
            !filter.set.as_ref().is_some_and(|set| set.contains(&value))
        }
    }
}
