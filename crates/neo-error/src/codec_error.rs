use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use thiserror::Error;

/// Errors raised while reading or writing the Neo binary wire format.
///
/// Every variant that can be attributed to a specific field carries the
/// field name (and, where meaningful, the byte offset) so callers can
/// locate the offending bytes without re-parsing.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CodecError {
    #[error("truncated input: expected {expected} more byte(s) for `{field}` at offset {offset}")]
    TruncatedInput { field: String, offset: usize, expected: usize },

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid op code: 0x{0:02x}")]
    InvalidOpCode(u32),

    #[error("unknown discriminant {value} for `{field}`")]
    UnknownDiscriminant { field: String, value: u64 },

    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("nesting depth exceeded for `{field}`: max {max}")]
    DepthExceeded { field: String, max: u8 },

    #[error("too many items in `{field}`: {count} exceeds max {max}")]
    TooManyItems { field: String, count: usize, max: usize },

    #[error("value {value} out of range for `{field}`")]
    OutOfRange { field: String, value: i64 },
}

impl<T> From<TryFromPrimitiveError<T>> for CodecError
where
    T: TryFromPrimitive,
    T::Primitive: Into<i128>,
{
    fn from(e: TryFromPrimitiveError<T>) -> Self {
        CodecError::InvalidOpCode(e.number.into() as u32)
    }
}
