//! C4 — Value iterator.
//!
//! Yields `(value, rid, is_empty)` triples from a raw block, honoring a
//! caller-supplied RID order and EMPTY-cell elision. Single-pass, finite,
//! and infallible — there is no error path here.

use crate::kind::Width;
use crate::word::Word;

/// Which traversal the driver selected for this scan (see `scan::scan_block`
/// step 1 and the data-model note on why EMPTY elision depends on whether
/// RIDs are part of the output).
enum Mode<'a> {
    /// Visit `src[rid_array[i]]` for `i in 0..rid_array.len()`, skipping
    /// EMPTY cells.
    RidOrdered { rid_array: &'a [u16] },
    /// Visit `src[0..]` in order, skipping EMPTY cells, yielding the
    /// natural index as the RID.
    NaturalSkipEmpty,
    /// Visit `src[0..]` in order without skipping EMPTY cells, flagging
    /// each one instead.
    NaturalKeepEmpty,
}

/// Iterates one raw block's cells under the mode the scan driver selected.
pub struct ValueIterator<'a> {
    src: &'a [u8],
    width: Width,
    empty_value: Word,
    mode: Mode<'a>,
    i: usize,
}

impl<'a> ValueIterator<'a> {
    /// RID-ordered traversal: `rid_array` gives the visiting order.
    pub fn rid_ordered(src: &'a [u8], width: Width, empty_value: Word, rid_array: &'a [u16]) -> Self {
        ValueIterator {
            src,
            width,
            empty_value,
            mode: Mode::RidOrdered { rid_array },
            i: 0,
        }
    }

    /// Natural traversal. `output_wants_rid` selects whether EMPTY cells
    /// are skipped (so RID output slots are never wasted on them) or kept
    /// and flagged (so callers without RID output still see one triple per
    /// block slot, preserving alignment).
    pub fn natural(src: &'a [u8], width: Width, empty_value: Word, output_wants_rid: bool) -> Self {
        let mode = if output_wants_rid {
            Mode::NaturalSkipEmpty
        } else {
            Mode::NaturalKeepEmpty
        };
        ValueIterator {
            src,
            width,
            empty_value,
            mode,
            i: 0,
        }
    }

    fn cell_count(&self) -> usize {
        self.src.len() / self.width.bytes()
    }

    fn read(&self, index: usize) -> Word {
        let w = self.width.bytes();
        Word::read(&self.src[index * w..(index + 1) * w], self.width)
    }
}

impl<'a> Iterator for ValueIterator<'a> {
    /// `(value, rid, is_empty)`.
    type Item = (Word, u16, bool);

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode {
            Mode::RidOrdered { rid_array } => {
                while self.i < rid_array.len() {
                    let rid = rid_array[self.i];
                    self.i += 1;
                    let value = self.read(rid as usize);
                    if value != self.empty_value {
                        return Some((value, rid, false));
                    }
                }
                None
            }
            Mode::NaturalSkipEmpty => {
                let count = self.cell_count();
                while self.i < count {
                    let rid = self.i as u16;
                    let value = self.read(self.i);
                    self.i += 1;
                    if value != self.empty_value {
                        return Some((value, rid, false));
                    }
                }
                None
            }
            Mode::NaturalKeepEmpty => {
                let count = self.cell_count();
                if self.i >= count {
                    return None;
                }
                let rid = self.i as u16;
                let value = self.read(self.i);
                self.i += 1;
                let is_empty = value == self.empty_value;
                Some((value, rid, is_empty))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_of_i32(cells: &[i32]) -> Vec<u8> {
        cells.iter().flat_map(|c| c.to_ne_bytes()).collect()
    }

    fn empty() -> Word {
        Word::read(&i32::MIN.to_ne_bytes(), Width::W4)
    }

    #[test]
    fn natural_skip_empty_omits_empties_and_renumbers_rids_by_position() {
        let block = block_of_i32(&[10, i32::MIN, 20]);
        let out: Vec<_> = ValueIterator::natural(&block, Width::W4, empty(), true).collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].1, 0);
        assert_eq!(out[1].1, 2);
        assert!(!out[0].2 && !out[1].2);
    }

    #[test]
    fn natural_keep_empty_flags_instead_of_skipping() {
        let block = block_of_i32(&[10, i32::MIN, 20]);
        let out: Vec<_> = ValueIterator::natural(&block, Width::W4, empty(), false).collect();
        assert_eq!(out.len(), 3);
        assert!(out[1].2);
        assert!(!out[0].2 && !out[2].2);
    }

    #[test]
    fn rid_ordered_skips_empty_and_preserves_caller_order() {
        let block = block_of_i32(&[10, i32::MIN, 20, 30]);
        let rids = [3u16, 1, 0];
        let out: Vec<_> = ValueIterator::rid_ordered(&block, Width::W4, empty(), &rids).collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].1, 3);
        assert_eq!(out[1].1, 0);
    }
}
