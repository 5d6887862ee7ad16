//! External interfaces: request/response header framing.
//!
//! Packed, little-endian, matching the server convention the teacher
//! engine uses for its own on-disk structures (see `storage::pager`'s
//! header (de)serialization, which reads/writes fixed fields via
//! `from_be_bytes`/`to_be_bytes` slices at fixed offsets — this module
//! follows the same direct-slice style, little-endian per this format's
//! own contract).

use bitflags::bitflags;

use crate::comparator::{decode_cop, Cop};
use crate::error::{Error, ErrorCode, Result};
use crate::filter::{Bop, FilterEntry};
use crate::kind::{Collation, DataType, TypeInfo, Width};
use crate::word::Word;

bitflags! {
    /// `OutputType` bitfield from the request header, echoed to the
    /// response and controlling what the emitter writes per matching row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutputType: u8 {
        const RID = 0x01;
        const TOKEN = 0x02;
        const DATAVALUE = 0x04;
    }
}

/// `ISM` + `PrimitiveHeader` fixed prefix: opaque to this core, copied
/// verbatim from request to response.
pub const PREFIX_LEN: usize = 16;

/// `colType` descriptor: logical type, cell width, and collation info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColType {
    pub data_type: DataType,
    pub width: Width,
    pub type_info: TypeInfo,
}

/// Decoded request header plus the two trailing variable-length sections.
#[derive(Debug, Clone)]
pub struct Request {
    pub prefix: [u8; PREFIX_LEN],
    pub lbid: i64,
    pub output_type: OutputType,
    pub bop: Bop,
    pub col_type: ColType,
    /// Caller-supplied RID subset, or empty for natural-order iteration.
    pub rid_array: Vec<u16>,
    pub filter_entries: Vec<FilterEntry>,
}

const FIXED_HEADER_LEN: usize = PREFIX_LEN + 8 + 1 + 4 + 4 + 1 + 1 + 1 + 1 + 1;

/// Parse a request header and its trailing RID/filter payload.
pub fn parse_request(bytes: &[u8]) -> Result<Request> {
    if bytes.len() < FIXED_HEADER_LEN {
        return Err(Error::with_message(
            ErrorCode::Corrupt,
            "request header shorter than the fixed framing",
        ));
    }

    let mut off = 0usize;
    let mut prefix = [0u8; PREFIX_LEN];
    prefix.copy_from_slice(&bytes[off..off + PREFIX_LEN]);
    off += PREFIX_LEN;

    let lbid = i64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
    off += 8;

    let output_type = OutputType::from_bits_truncate(bytes[off]);
    off += 1;

    let nvals = u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap()) as usize;
    off += 4;

    let nops = u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap()) as usize;
    off += 4;

    let bop = Bop::from_u8(bytes[off]);
    off += 1;

    let data_type = DataType::from_u8(bytes[off]).ok_or_else(|| {
        Error::with_message(ErrorCode::Format, format!("unknown DataType byte {}", bytes[off]))
    })?;
    off += 1;

    let width_byte = bytes[off] as usize;
    let width = Width::from_bytes(width_byte).ok_or_else(|| {
        Error::with_message(ErrorCode::Format, format!("unsupported column width {width_byte}"))
    })?;
    off += 1;

    let collation = Collation::from_u8(bytes[off]);
    off += 1;
    let case_sensitive = bytes[off] != 0;
    off += 1;

    let w = width.bytes();
    let rid_bytes = nvals * 2;
    let filter_bytes = nops * (2 + w);
    if bytes.len() < off + rid_bytes + filter_bytes {
        return Err(Error::with_message(
            ErrorCode::Corrupt,
            "request payload shorter than NVALS/NOPS imply",
        ));
    }

    let mut rid_array = Vec::with_capacity(nvals);
    for _ in 0..nvals {
        rid_array.push(u16::from_le_bytes(bytes[off..off + 2].try_into().unwrap()));
        off += 2;
    }

    let mut filter_entries = Vec::with_capacity(nops);
    for _ in 0..nops {
        let cop = decode_cop(bytes[off]);
        let rf = bytes[off + 1];
        let value = Word::read(&bytes[off + 2..off + 2 + w], width);
        filter_entries.push(FilterEntry { cop, rf, value });
        off += 2 + w;
    }

    Ok(Request {
        prefix,
        lbid,
        output_type,
        bop,
        col_type: ColType {
            data_type,
            width,
            type_info: TypeInfo {
                collation,
                case_sensitive,
            },
        },
        rid_array,
        filter_entries,
    })
}

/// Response header, finalized by the scan driver and followed by the
/// packed per-row record stream.
#[derive(Debug, Clone)]
pub struct Response {
    pub prefix: [u8; PREFIX_LEN],
    pub lbid: i64,
    pub nvals: u32,
    pub min: Word,
    pub max: Word,
    pub rid_flags: u8,
    pub valid_min_max: bool,
    pub cache_io: u32,
    pub physical_io: u32,
}

impl Response {
    /// Serialize the header (not the record stream) in the same packed
    /// little-endian layout `parse_request` reads.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIXED_HEADER_LEN);
        out.extend_from_slice(&self.prefix);
        out.extend_from_slice(&self.lbid.to_le_bytes());
        out.extend_from_slice(&self.nvals.to_le_bytes());
        out.extend_from_slice(&self.min.to_bytes());
        out.extend_from_slice(&self.max.to_bytes());
        out.push(self.rid_flags);
        out.push(self.valid_min_max as u8);
        out.extend_from_slice(&self.cache_io.to_le_bytes());
        out.extend_from_slice(&self.physical_io.to_le_bytes());
        out
    }
}

pub const RESPONSE_COMMAND_TAG: u8 = 1; // "COL_RESULTS" equivalent, echoed in the prefix by the caller.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::Cop;

    fn sample_request_bytes() -> Vec<u8> {
        let mut b = vec![0u8; PREFIX_LEN];
        b.extend_from_slice(&42i64.to_le_bytes()); // lbid
        b.push(OutputType::RID.bits() | OutputType::DATAVALUE.bits());
        b.extend_from_slice(&0u32.to_le_bytes()); // nvals
        b.extend_from_slice(&1u32.to_le_bytes()); // nops
        b.push(1); // BOP::And
        b.push(DataType::Int.to_u8());
        b.push(4); // width
        b.push(Collation::BinSort.to_u8());
        b.push(1); // case sensitive
        // one filter entry: LT, rf=0, value=5
        b.push(Cop::Lt as u8);
        b.push(0);
        b.extend_from_slice(&5i32.to_ne_bytes());
        b
    }

    #[test]
    fn parses_fixed_fields_and_trailing_filter() {
        let bytes = sample_request_bytes();
        let req = parse_request(&bytes).unwrap();
        assert_eq!(req.lbid, 42);
        assert_eq!(req.col_type.data_type, DataType::Int);
        assert_eq!(req.col_type.width, Width::W4);
        assert_eq!(req.filter_entries.len(), 1);
        assert_eq!(req.filter_entries[0].cop, Cop::Lt);
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut bytes = sample_request_bytes();
        bytes.truncate(bytes.len() - 1);
        assert!(parse_request(&bytes).is_err());
    }

    #[test]
    fn response_round_trips_fixed_fields() {
        let resp = Response {
            prefix: [0u8; PREFIX_LEN],
            lbid: 7,
            nvals: 3,
            min: Word::read(&1i32.to_ne_bytes(), Width::W4),
            max: Word::read(&9i32.to_ne_bytes(), Width::W4),
            rid_flags: 0b11,
            valid_min_max: true,
            cache_io: 0,
            physical_io: 0,
        };
        let bytes = resp.to_bytes();
        assert_eq!(bytes.len(), PREFIX_LEN + 8 + 4 + 4 + 4 + 1 + 1 + 4 + 4);
    }
}
