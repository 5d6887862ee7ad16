//! C6 — Scan driver.
//!
//! Ties C1–C5 together: reselect the compare `Kind`, seed min/max, iterate
//! the block, evaluate the filter per cell, and pack matching rows into the
//! caller's output buffer while accumulating the zone-map and RID-bucket
//! summary the response header reports.

use crate::comparator::Cop;
use crate::error::{Error, ErrorCode, Result};
use crate::evaluator;
use crate::filter::CompiledFilter;
use crate::iter::ValueIterator;
use crate::kind::{DataType, Kind, TypeInfo, Width};
use crate::protocol::OutputType;
use crate::sentinel;
use crate::word::Word;

/// Reselect the comparator `Kind` from the schema `DataType` and the
/// column's actual cell width, per the driver's first step: floats are
/// recognized by width rather than trusted from `DataType` alone (so a
/// mis-widened float column still compares bit-correctly as an integer
/// rather than silently reinterpreting foreign bits), CHAR/VARCHAR/TEXT/BLOB
/// columns below the dictionary-token cutoff compare as `Text`, and
/// everything else falls back to `Unsigned`/`Default` by sign.
pub fn resolve_kind(data_type: DataType, width: Width) -> Kind {
    // Width 16 (wide DECIMAL) always compares as signed 128-bit, regardless
    // of the schema's logical type.
    if width == Width::W16 {
        return Kind::Default;
    }
    let w = width.bytes();
    if data_type.is_float() && matches!(width, Width::W4 | Width::W8) {
        return Kind::Float;
    }
    if data_type.is_char_like() && !crate::kind::is_dict_token_scan(data_type, w) {
        return Kind::Text;
    }
    if data_type.is_unsigned() {
        Kind::Unsigned
    } else {
        Kind::Default
    }
}

/// True when `(data_type, width)` admits min/max zone-map tracking: the
/// integer families at any width, date/time types at width 4 or 8, `CHAR`
/// up to 8 bytes, `VARCHAR`/`TEXT`/`BLOB` up to 7 bytes, and `DECIMAL` at any
/// supported width. Columns outside this list, or scans restricted to a
/// caller-supplied RID subset, never update the header's min/max fields.
pub fn valid_minmax(data_type: DataType, width: Width, has_rid_subset: bool) -> bool {
    if has_rid_subset {
        return false;
    }
    use DataType::*;
    match data_type {
        TinyInt | SmallInt | MedInt | Int | BigInt | UTinyInt | USmallInt | UMedInt | UInt
        | UBigInt => true,
        Date | DateTime | Time | Timestamp => matches!(width, Width::W4 | Width::W8),
        Char => width.bytes() <= 8,
        VarChar | Text | Blob => width.bytes() <= 7,
        Decimal | UDecimal => true,
        Float | UFloat | Double | UDouble | VarBinary => false,
    }
}

/// Min is seeded to the type's max and max to the type's min, so the first
/// tracked value always displaces both. Byte layout assumes a little-endian
/// host, consistent with `Word`'s native-endian raw-byte contract.
fn seed_min_max(data_type: DataType, width: Width) -> (Word, Word) {
    let w = width.bytes();
    if data_type.is_unsigned() {
        (Word::read(&vec![0xFFu8; w], width), Word::read(&vec![0u8; w], width))
    } else {
        let mut max_bytes = vec![0xFFu8; w];
        if let Some(last) = max_bytes.last_mut() {
            *last = 0x7F;
        }
        let mut min_bytes = vec![0u8; w];
        if let Some(last) = min_bytes.last_mut() {
            *last = 0x80;
        }
        (Word::read(&max_bytes, width), Word::read(&min_bytes, width))
    }
}

/// Result of one `scan_block` call: the packed output record stream plus
/// the zone-map/bucket summary that becomes the response header.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub output: Vec<u8>,
    pub nvals: u32,
    pub min: Word,
    pub max: Word,
    pub rid_flags: u8,
    pub valid_min_max: bool,
}

/// Sort `rid_array` into ascending order, short-circuiting if it is already
/// sorted — duplicates are legal and preserved.
fn sorted_rids(rid_array: &[u16]) -> Vec<u16> {
    if rid_array.windows(2).all(|w| w[0] <= w[1]) {
        return rid_array.to_vec();
    }
    let mut v = rid_array.to_vec();
    v.sort_unstable();
    v
}

/// Run one block through the compiled filter, writing matching rows into a
/// caller-sized output buffer.
///
/// `rid_array` is the caller's RID subset (empty means "scan naturally").
/// `out_capacity` bounds the output buffer in bytes; emission that would
/// exceed it is a hard error (message id 35) rather than silent truncation.
pub fn scan_block(
    src: &[u8],
    data_type: DataType,
    width: Width,
    type_info: &TypeInfo,
    filter: &CompiledFilter,
    output_type: OutputType,
    rid_array: &[u16],
    out_capacity: usize,
) -> Result<ScanResult> {
    let kind = resolve_kind(data_type, width);
    let (null_value, empty_value) = sentinel::lookup(data_type, width);
    let w = width.bytes();

    let null_matches = evaluator::matches(null_value, filter, true, kind, type_info);

    let sorted;
    let mut iter = if rid_array.is_empty() {
        ValueIterator::natural(src, width, empty_value, output_type.contains(OutputType::RID))
    } else {
        sorted = sorted_rids(rid_array);
        ValueIterator::rid_ordered(src, width, empty_value, &sorted)
    };

    let track_minmax = valid_minmax(data_type, width, !rid_array.is_empty());
    let (mut min, mut max) = seed_min_max(data_type, width);
    let mut any_tracked = false;

    let mut output = Vec::new();
    let mut nvals: u32 = 0;
    let mut rid_flags: u8 = 0;
    let record_len = (if output_type.contains(OutputType::RID) { 2 } else { 0 })
        + (if output_type.intersects(OutputType::TOKEN | OutputType::DATAVALUE) {
            w
        } else {
            0
        });

    while let Some((value, rid, is_empty)) = iter.next() {
        if is_empty {
            continue;
        }

        let is_null = is_null_value(value, kind, width, null_value);

        if track_minmax && !is_null {
            if !any_tracked {
                min = value;
                max = value;
                any_tracked = true;
            } else if compare_for_minmax(kind, value, min) {
                min = value;
            } else if compare_for_minmax(kind, max, value) {
                max = value;
            }
        }

        let hit = if is_null {
            null_matches
        } else {
            evaluator::matches(value, filter, false, kind, type_info)
        };
        if !hit {
            continue;
        }

        if output.len() + record_len > out_capacity {
            log::error!(
                "buffer overflow (msg 35): {} bytes already written, record {} would exceed capacity {out_capacity}",
                output.len(),
                hex::encode(value.to_bytes()),
            );
            return Err(Error::with_message(
                ErrorCode::TooBig,
                "scan output buffer exhausted (msg 35)",
            ));
        }

        if output_type.contains(OutputType::RID) {
            output.extend_from_slice(&rid.to_le_bytes());
        }
        if output_type.intersects(OutputType::TOKEN | OutputType::DATAVALUE) {
            output.extend_from_slice(&value.to_bytes());
        }

        nvals += 1;
        rid_flags |= 1u8 << (rid >> 9);
    }

    Ok(ScanResult {
        output,
        nvals,
        min,
        max,
        rid_flags,
        valid_min_max: track_minmax,
    })
}

/// True when `value` is the column's NULL sentinel. `Text` kind at 8-byte
/// width additionally recognizes the historical alternate NULL pattern
/// (`sentinel::TEXT8_ALT_NULL`) — an asymmetry kept intentionally one-sided,
/// since `sentinel::lookup` never generates that pattern itself.
fn is_null_value(value: Word, kind: Kind, width: Width, null_value: Word) -> bool {
    if value == null_value {
        return true;
    }
    kind == Kind::Text && width == Width::W8 && value == sentinel::TEXT8_ALT_NULL
}

fn compare_for_minmax(kind: Kind, a: Word, b: Word) -> bool {
    match kind {
        Kind::Default => a.as_signed() < b.as_signed(),
        Kind::Unsigned | Kind::Text => a.as_unsigned() < b.as_unsigned(),
        Kind::Float => match a.width() {
            Width::W4 => a.as_f32() < b.as_f32(),
            _ => a.as_f64() < b.as_f64(),
        },
    }
}
