//! Typed failures for the strict codec layer.
//!
//! Only the codecs (hex, TLV, header) produce errors. Classification and
//! scoring are lenient by design and never fail; see [`crate::classify`].

use std::io;
use thiserror::Error;

/// Core error type for segop-buds codec operations.
#[derive(Error, Debug)]
pub enum BudsError {
    /// IO-related errors during cursor reads.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Hex text with an odd number of digits.
    #[error("Hex string must have even length")]
    InvalidHexLength,
    /// Character outside `[0-9a-fA-F]` in hex text.
    #[error("Invalid hex digit: {0:?}")]
    InvalidHexDigit(char),
    /// TLV prefix or value cut off before its declared end.
    #[error("Truncated TLV record")]
    TruncatedRecord,
    /// TLV value too large for the 1-byte length field.
    #[error("TLV value too long for 1-byte length: {0} bytes (max 255)")]
    ValueTooLong(usize),
    /// Header TLV declares more value bytes than the buffer holds.
    #[error("BUDS header TLV length mismatch")]
    HeaderLengthMismatch,
    /// Header value shorter than the mandatory tier/type/subtype bytes.
    #[error("BUDS header value too short: {0} bytes")]
    HeaderValueTooShort(u8),
    /// Header value ends before the appId length byte.
    #[error("Missing appId length in BUDS header")]
    MissingAppIdLength,
    /// Declared appId length exceeds the remaining header value.
    #[error("appId length exceeds BUDS header value")]
    AppIdOverrun,
    /// Declared version length exceeds the remaining header value.
    #[error("version length exceeds BUDS header value")]
    VersionOverrun,
    /// Header sub-field too large for its 1-byte length on encode.
    #[error("Header field too long for 1-byte length: {0}")]
    FieldTooLong(&'static str),
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BudsError>;
