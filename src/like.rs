//! `LIKE` pattern matching for the `Text` kind's comparator path.
//!
//! Grounded on the teacher's `functions::scalar::like_match_impl` —
//! same backtracking strategy for `%` (match any run) and `_` (match one
//! char), adapted to operate on the right-trimmed inline strings this
//! engine compares rather than on `Mem` register values, and without the
//! escape-character option the SQL-facing `LIKE` supports (not part of
//! this primitive's filter wire format).

use crate::kind::{Collation, TypeInfo};

/// True if `text` matches `pattern` under `type_info`'s case sensitivity.
pub fn like_match(pattern: &str, text: &str, type_info: &TypeInfo) -> bool {
    let case_sensitive = type_info.case_sensitive && !matches!(type_info.collation, Collation::NoCase);
    let pattern: Vec<char> = if case_sensitive {
        pattern.chars().collect()
    } else {
        pattern.to_lowercase().chars().collect()
    };
    let text: Vec<char> = if case_sensitive {
        text.chars().collect()
    } else {
        text.to_lowercase().chars().collect()
    };
    like_match_impl(&pattern, &text)
}

fn like_match_impl(pattern: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0usize, 0usize);
    let (mut star_p, mut star_t): (Option<usize>, usize) = (None, 0);

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            star_p = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(sp) = star_p {
            p = sp + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '%' {
        p += 1;
    }
    p == pattern.len()
}

/// String comparison key honoring `type_info`'s collation, for the generic
/// (non-fast-path) `Text` compare branch.
///
/// Grounded on the teacher's `vdbe::sort::compare_mem` collation dispatch
/// (`NOCASE` lowercases, `RTRIM` trims trailing whitespace, default is
/// `BINARY`).
pub fn collate_key(s: &str, type_info: &TypeInfo) -> String {
    match type_info.collation {
        Collation::NoCase => s.to_lowercase(),
        Collation::RTrim => s.trim_end().to_string(),
        Collation::BinSort => s.to_string(),
    }
}
