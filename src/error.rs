//! Error types and Result alias.
//!
//! `ErrorCode` mirrors the sqlite3 primary result code space so callers can
//! map failures onto a familiar numbering scheme. `Error` adds an optional
//! human-readable message, matching how `sqlite3_errmsg` augments a bare
//! result code.

use std::fmt;

use thiserror::Error as ThisError;

/// Primary result/error codes, numbered the way sqlite3's `SQLITE_*` constants are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    Error = 1,
    Internal = 2,
    Perm = 3,
    Abort = 4,
    Busy = 5,
    Locked = 6,
    NoMem = 7,
    ReadOnly = 8,
    Interrupt = 9,
    IoErr = 10,
    Corrupt = 11,
    NotFound = 12,
    Full = 13,
    CantOpen = 14,
    Protocol = 15,
    Empty = 16,
    Schema = 17,
    TooBig = 18,
    Constraint = 19,
    Mismatch = 20,
    Misuse = 21,
    NoLfs = 22,
    Auth = 23,
    Format = 24,
    Range = 25,
    NotADb = 26,
    Notice = 27,
    Warning = 28,
    Row = 100,
    Done = 101,
}

impl ErrorCode {
    /// Create from the primary result-code integer, or `None` if unrecognized.
    pub fn from_i32(v: i32) -> Option<Self> {
        use ErrorCode::*;
        let code = match v {
            0 => Ok,
            1 => Error,
            2 => Internal,
            3 => Perm,
            4 => Abort,
            5 => Busy,
            6 => Locked,
            7 => NoMem,
            8 => ReadOnly,
            9 => Interrupt,
            10 => IoErr,
            11 => Corrupt,
            12 => NotFound,
            13 => Full,
            14 => CantOpen,
            15 => Protocol,
            16 => Empty,
            17 => Schema,
            18 => TooBig,
            19 => Constraint,
            20 => Mismatch,
            21 => Misuse,
            22 => NoLfs,
            23 => Auth,
            24 => Format,
            25 => Range,
            26 => NotADb,
            27 => Notice,
            28 => Warning,
            100 => Row,
            101 => Done,
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An engine error: a result code plus an optional message.
#[derive(Debug, Clone, ThisError)]
#[error("{code}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    code: ErrorCode,
    message: Option<String>,
}

impl Error {
    /// Build an error carrying only a result code.
    pub fn new(code: ErrorCode) -> Self {
        Error {
            code,
            message: None,
        }
    }

    /// Build an error carrying a result code and a descriptive message.
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: Some(message.into()),
        }
    }

    /// The primary result code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The attached message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Result type alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
