//! Logical column types, compare-semantic kinds, and widths.
//!
//! Corresponds to the `CalpontSystemCatalog::ColDataType` / `ENUM_KIND`
//! split in the primitive's C++ ancestor: `DataType` is what the schema
//! says a column holds; `Kind` is how the comparator actually treats its
//! bit pattern. The scan driver reselects `Kind` from `DataType` and
//! column width (see `scan::resolve_kind`).

/// Logical SQL column type, as carried in the request header's `colType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DataType {
    TinyInt,
    SmallInt,
    MedInt,
    Int,
    BigInt,
    UTinyInt,
    USmallInt,
    UMedInt,
    UInt,
    UBigInt,
    Float,
    UFloat,
    Double,
    UDouble,
    Decimal,
    UDecimal,
    Date,
    DateTime,
    Time,
    Timestamp,
    Char,
    VarChar,
    Text,
    Blob,
    VarBinary,
}

impl DataType {
    /// True for the unsigned integer family.
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            DataType::UTinyInt
                | DataType::USmallInt
                | DataType::UMedInt
                | DataType::UInt
                | DataType::UBigInt
                | DataType::UFloat
                | DataType::UDouble
                | DataType::UDecimal
        )
    }

    /// True for the floating-point family (single or double precision).
    pub fn is_float(self) -> bool {
        matches!(
            self,
            DataType::Float | DataType::UFloat | DataType::Double | DataType::UDouble
        )
    }

    /// True for character/string-ish column types.
    pub fn is_char_like(self) -> bool {
        matches!(
            self,
            DataType::Char | DataType::VarChar | DataType::Text | DataType::Blob
        )
    }

    /// True for `CHAR` specifically, as opposed to `VARCHAR`/`TEXT`/`BLOB` —
    /// the dictionary-token width cutoff differs between the two (see
    /// `is_dict_token_scan`).
    pub fn is_char(self) -> bool {
        matches!(self, DataType::Char)
    }

    /// Decode the wire `colType.DataType` byte.
    pub fn from_u8(v: u8) -> Option<DataType> {
        use DataType::*;
        let t = match v {
            0 => TinyInt,
            1 => SmallInt,
            2 => MedInt,
            3 => Int,
            4 => BigInt,
            5 => UTinyInt,
            6 => USmallInt,
            7 => UMedInt,
            8 => UInt,
            9 => UBigInt,
            10 => Float,
            11 => UFloat,
            12 => Double,
            13 => UDouble,
            14 => Decimal,
            15 => UDecimal,
            16 => Date,
            17 => DateTime,
            18 => Time,
            19 => Timestamp,
            20 => Char,
            21 => VarChar,
            22 => Text,
            23 => Blob,
            24 => VarBinary,
            _ => return None,
        };
        Some(t)
    }

    /// Encode for the wire `colType.DataType` byte.
    pub fn to_u8(self) -> u8 {
        use DataType::*;
        match self {
            TinyInt => 0,
            SmallInt => 1,
            MedInt => 2,
            Int => 3,
            BigInt => 4,
            UTinyInt => 5,
            USmallInt => 6,
            UMedInt => 7,
            UInt => 8,
            UBigInt => 9,
            Float => 10,
            UFloat => 11,
            Double => 12,
            UDouble => 13,
            Decimal => 14,
            UDecimal => 15,
            Date => 16,
            DateTime => 17,
            Time => 18,
            Timestamp => 19,
            Char => 20,
            VarChar => 21,
            Text => 22,
            Blob => 23,
            VarBinary => 24,
        }
    }
}

/// Raw cell width in bytes. Matches the source's template parameter
/// `COL_WIDTH` instantiated for `int8_t`..`int128_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W1,
    W2,
    W4,
    W8,
    W16,
}

impl Width {
    pub fn bytes(self) -> usize {
        match self {
            Width::W1 => 1,
            Width::W2 => 2,
            Width::W4 => 4,
            Width::W8 => 8,
            Width::W16 => 16,
        }
    }

    /// Decode the wire `colType.DataSize` byte. `None` for any value that
    /// is not one of the five supported widths.
    pub fn from_bytes(n: usize) -> Option<Width> {
        match n {
            1 => Some(Width::W1),
            2 => Some(Width::W2),
            4 => Some(Width::W4),
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            _ => None,
        }
    }
}

/// Semantic compare category. Chosen once per scan by `scan::resolve_kind`
/// from `(DataType, Width)` and held fixed for the duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Default,
    Unsigned,
    Float,
    Text,
}

/// Returns true when a CHAR/VARCHAR/TEXT/BLOB column at this width is routed
/// through the (out-of-scope) dictionary-token path rather than scanned
/// in-line as `Text` kind.
///
/// Grounded on the original engine's `isDictTokenScan`: `CHAR` tolerates one
/// extra byte (it never carries an inline length prefix) so its cutoff is
/// width > 8, while `VARCHAR`/`TEXT`/`BLOB` cut off at width > 7.
pub fn is_dict_token_scan(data_type: DataType, width_bytes: usize) -> bool {
    if data_type.is_char() {
        width_bytes > 8
    } else if data_type.is_char_like() {
        width_bytes > 7
    } else {
        false
    }
}

/// Collation/charset descriptor carried by reference from the request
/// header's `colType`, shared across every block scanned for one column in
/// one query (see data model lifecycle notes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub collation: Collation,
    pub case_sensitive: bool,
}

impl TypeInfo {
    pub const BINARY: TypeInfo = TypeInfo {
        collation: Collation::BinSort,
        case_sensitive: true,
    };

    /// True when the comparator's BinSort+NoPad fast path (byte-swap and
    /// compare as unsigned integers) applies.
    pub fn is_bin_sort_no_pad(&self) -> bool {
        matches!(self.collation, Collation::BinSort)
    }
}

impl Default for TypeInfo {
    fn default() -> Self {
        TypeInfo::BINARY
    }
}

/// Collation family. `BinSort` implies NoPad in this engine (there is no
/// separate padded binary collation), so the comparator's fast-path check
/// collapses to a single variant test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    BinSort,
    NoCase,
    RTrim,
}

impl Collation {
    pub fn from_u8(v: u8) -> Collation {
        match v {
            1 => Collation::NoCase,
            2 => Collation::RTrim,
            _ => Collation::BinSort,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Collation::BinSort => 0,
            Collation::NoCase => 1,
            Collation::RTrim => 2,
        }
    }
}
