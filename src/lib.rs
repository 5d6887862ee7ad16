//! Columnar block scan-and-filter primitive.

#![allow(clippy::approx_constant)]

pub mod comparator;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod iter;
pub mod kind;
pub mod like;
pub mod protocol;
pub mod scan;
pub mod sentinel;
pub mod word;

pub use comparator::{compare, decode_cop, Cop};
pub use error::{Error, ErrorCode, Result};
pub use evaluator::matches;
pub use filter::{compile, compile_with_threshold, Bop, CompiledFilter, FilterEntry, FilterMode};
pub use iter::ValueIterator;
pub use kind::{Collation, DataType, Kind, TypeInfo, Width};
pub use protocol::{parse_request, ColType, OutputType, Request, Response};
pub use scan::{resolve_kind, scan_block, valid_minmax, ScanResult};
pub use sentinel::{lookup as sentinel_lookup, TEXT8_ALT_NULL};
pub use word::Word;
