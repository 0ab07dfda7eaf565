//! Flat TLV sequence codec.
//!
//! Wire layout of one record:
//!
//!   [ type (1 byte) | length (1 byte) | value (length bytes) ]
//!
//! Sequences are plain concatenations of records with no inter-record
//! padding or alignment. Decoding is strict: a malformed record fails the
//! whole call, it never resyncs past it.

use crate::errors::{BudsError, Result};
use byteorder::ReadBytesExt;
use std::io::{Cursor, Read};

/// One decoded TLV record.
///
/// The declared length is implicit: it always equals `value.len()`, which
/// never exceeds 255 for a record produced by this codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvRecord {
    /// Type byte.
    pub tlv_type: u8,
    /// Value bytes, exactly as declared by the length field.
    pub value: Vec<u8>,
}

impl TlvRecord {
    /// The wire length byte for this record's value.
    pub fn length(&self) -> u8 {
        self.value.len() as u8
    }
}

/// Encodes one record as `type || len || value`.
///
/// # Errors
/// - [`BudsError::ValueTooLong`] if `value` exceeds 255 bytes (the 1-byte
///   length field cannot represent more).
pub fn encode_one(tlv_type: u8, value: &[u8]) -> Result<Vec<u8>> {
    if value.len() > 255 {
        return Err(BudsError::ValueTooLong(value.len()));
    }
    let mut out = Vec::with_capacity(2 + value.len());
    out.push(tlv_type);
    out.push(value.len() as u8);
    out.extend_from_slice(value);
    Ok(out)
}

/// Encodes a sequence of `(type, value)` pairs in input order.
pub fn encode_sequence(records: &[(u8, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (tlv_type, value) in records {
        out.extend_from_slice(&encode_one(*tlv_type, value)?);
    }
    Ok(out)
}

/// Decodes a whole buffer as a TLV sequence, advancing until exhaustion.
///
/// # Errors
/// - [`BudsError::TruncatedRecord`] if fewer than 2 bytes remain where a
///   prefix is expected, or fewer than `length` bytes remain for the
///   declared value.
///
/// # Example
/// ```
/// use segop_buds::tlv::decode_sequence;
///
/// let records = decode_sequence(&[0xf1, 0x02, 0xaa, 0xbb, 0xf2, 0x00]).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].value, vec![0xaa, 0xbb]);
/// assert!(records[1].value.is_empty());
/// ```
pub fn decode_sequence(bytes: &[u8]) -> Result<Vec<TlvRecord>> {
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::new();
    loop {
        let remaining = bytes.len() - cursor.position() as usize;
        if remaining == 0 {
            break;
        }
        if remaining < 2 {
            return Err(BudsError::TruncatedRecord);
        }
        let tlv_type = cursor.read_u8()?;
        let length = cursor.read_u8()? as usize;
        if bytes.len() - (cursor.position() as usize) < length {
            return Err(BudsError::TruncatedRecord);
        }
        let mut value = vec![0u8; length];
        cursor.read_exact(&mut value)?;
        records.push(TlvRecord { tlv_type, value });
    }
    Ok(records)
}
