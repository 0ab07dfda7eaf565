//! BUDS header codec: the distinguished TLV record (type `0xF0`) declaring
//! tier, type and optional app identity for a payload.
//!
//! Two wire profiles exist and both are accepted by [`decode_header`]:
//!
//! - **Variable** (canonical): value =
//!   `tier(1) || typeCode(1) || subtypeCode(1) || appIdLen(1) || appId ||
//!   [versionLen(1) || version]`, with `appId`/`version` UTF-8 text and the
//!   version sub-field present only if bytes remain after `appId`.
//! - **Fixed**: value is exactly 6 bytes,
//!   `tier(1) || typeCode(1) || appId(u16 BE) || version(u16 BE)`, emitted
//!   by simpler producers.
//!
//! A decode distinguishes "no header at all" (`Ok(None)`) from a malformed
//! header (an error); encoding commits to one profile per call.

use crate::errors::{BudsError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

/// TLV type byte reserved for the BUDS header.
pub const HEADER_TLV_TYPE: u8 = 0xf0;

/// Declared value length of the fixed wire profile.
pub const FIXED_PROFILE_LEN: usize = 6;

/// Fields of a variable-profile header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    /// Tier 0..3.
    pub tier: u8,
    /// Type code within the tier.
    pub type_code: u8,
    /// Optional subtype; a wire byte of 0 means "absent".
    pub subtype_code: Option<u8>,
    /// Optional UTF-8 app identity (zero length on the wire means "absent").
    pub app_id: Option<String>,
    /// Optional UTF-8 schema/app version.
    pub version: Option<String>,
}

/// Fields of a fixed-profile header, numeric-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedHeader {
    /// Tier 0..3.
    pub tier: u8,
    /// Type code within the tier.
    pub type_code: u8,
    /// App registry index.
    pub app_id: u16,
    /// Schema / app version.
    pub version: u16,
}

/// A decoded header, tagged by the wire profile it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudsHeader {
    /// Variable-length profile with UTF-8 sub-fields.
    Variable(HeaderFields),
    /// Fixed 6-byte numeric profile.
    Fixed(FixedHeader),
}

impl BudsHeader {
    /// Tier byte, regardless of profile.
    pub fn tier(&self) -> u8 {
        match self {
            BudsHeader::Variable(h) => h.tier,
            BudsHeader::Fixed(h) => h.tier,
        }
    }

    /// Type code, regardless of profile.
    pub fn type_code(&self) -> u8 {
        match self {
            BudsHeader::Variable(h) => h.type_code,
            BudsHeader::Fixed(h) => h.type_code,
        }
    }
}

/// Decodes a BUDS header from the start of `bytes`.
///
/// Returns `Ok(None)` when no header is present at all: the buffer is too
/// short to hold a TLV prefix, or the leading type byte is not `0xF0`.
/// Callers can therefore tell "no header" apart from "malformed header".
///
/// The variable profile is canonical and parsed first; the fixed profile is
/// tried only when the declared length is 6 and the variable parse fails.
///
/// # Errors
/// - [`BudsError::HeaderLengthMismatch`] if the declared length exceeds the
///   available bytes.
/// - [`BudsError::HeaderValueTooShort`] if the declared length is < 3
///   (tier/type/subtype are mandatory in both profiles).
/// - [`BudsError::MissingAppIdLength`], [`BudsError::AppIdOverrun`],
///   [`BudsError::VersionOverrun`] for variable-profile sub-field overruns.
///
/// # Example
/// ```
/// use segop_buds::header::{decode_header, BudsHeader};
///
/// // f0 06, tier 2, type 1, subtype absent, appId "gn"
/// let header = decode_header(&[0xf0, 0x06, 0x02, 0x01, 0x00, 0x02, 0x67, 0x6e]).unwrap();
/// match header {
///     Some(BudsHeader::Variable(h)) => {
///         assert_eq!(h.tier, 2);
///         assert_eq!(h.app_id.as_deref(), Some("gn"));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
///
/// // Wrong leading type byte: absent, not an error.
/// assert!(decode_header(&[0xf1, 0x00]).unwrap().is_none());
/// ```
pub fn decode_header(bytes: &[u8]) -> Result<Option<BudsHeader>> {
    if bytes.len() < 2 {
        return Ok(None);
    }
    if bytes[0] != HEADER_TLV_TYPE {
        return Ok(None);
    }
    let length = bytes[1] as usize;
    if 2 + length > bytes.len() {
        return Err(BudsError::HeaderLengthMismatch);
    }
    if length < 3 {
        return Err(BudsError::HeaderValueTooShort(bytes[1]));
    }
    let value = &bytes[2..2 + length];
    match parse_variable_value(value) {
        Ok(fields) => Ok(Some(BudsHeader::Variable(fields))),
        Err(_) if length == FIXED_PROFILE_LEN => {
            Ok(Some(BudsHeader::Fixed(parse_fixed_value(value)?)))
        }
        Err(err) => Err(err),
    }
}

/// Decodes a BUDS header from hex text; see [`decode_header`].
pub fn decode_header_hex(text: &str) -> Result<Option<BudsHeader>> {
    decode_header(&crate::hex::decode_hex(text)?)
}

// Caller guarantees value.len() >= 3.
fn parse_variable_value(value: &[u8]) -> Result<HeaderFields> {
    let tier = value[0];
    let type_code = value[1];
    let subtype_code = match value[2] {
        0 => None,
        code => Some(code),
    };

    let mut offset = 3;
    if offset >= value.len() {
        return Err(BudsError::MissingAppIdLength);
    }
    let app_id_len = value[offset] as usize;
    offset += 1;
    if offset + app_id_len > value.len() {
        return Err(BudsError::AppIdOverrun);
    }
    let app_id = decode_utf8_field(&value[offset..offset + app_id_len]);
    offset += app_id_len;

    let version = if offset < value.len() {
        let version_len = value[offset] as usize;
        offset += 1;
        if offset + version_len > value.len() {
            return Err(BudsError::VersionOverrun);
        }
        decode_utf8_field(&value[offset..offset + version_len])
    } else {
        None
    };

    Ok(HeaderFields { tier, type_code, subtype_code, app_id, version })
}

fn parse_fixed_value(value: &[u8]) -> Result<FixedHeader> {
    let mut cursor = Cursor::new(value);
    let tier = cursor.read_u8()?;
    let type_code = cursor.read_u8()?;
    let app_id = cursor.read_u16::<BigEndian>()?;
    let version = cursor.read_u16::<BigEndian>()?;
    Ok(FixedHeader { tier, type_code, app_id, version })
}

// UTF-8 is decoded leniently: invalid sequences are replaced rather than
// rejected, and zero length means "absent".
fn decode_utf8_field(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl HeaderFields {
    /// Encodes as a variable-profile header TLV.
    ///
    /// `decode_header(encode(h))` round-trips for any fields whose optional
    /// strings are either absent or non-empty (empty strings normalize to
    /// absent on the wire).
    ///
    /// # Errors
    /// - [`BudsError::FieldTooLong`] if `app_id` or `version` exceeds 255
    ///   UTF-8 bytes, or the assembled value exceeds 255 bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let app_id = self.app_id.as_deref().unwrap_or("");
        if app_id.len() > 255 {
            return Err(BudsError::FieldTooLong("appId"));
        }
        if let Some(version) = self.version.as_deref() {
            if version.len() > 255 {
                return Err(BudsError::FieldTooLong("version"));
            }
        }

        let mut value = Vec::new();
        value.push(self.tier);
        value.push(self.type_code);
        value.push(self.subtype_code.unwrap_or(0));
        value.push(app_id.len() as u8);
        value.extend_from_slice(app_id.as_bytes());
        if let Some(version) = self.version.as_deref() {
            value.push(version.len() as u8);
            value.extend_from_slice(version.as_bytes());
        }
        if value.len() > 255 {
            return Err(BudsError::FieldTooLong("header value"));
        }

        let mut out = Vec::with_capacity(2 + value.len());
        out.push(HEADER_TLV_TYPE);
        out.push(value.len() as u8);
        out.extend_from_slice(&value);
        Ok(out)
    }
}

impl FixedHeader {
    /// Encodes as a fixed-profile header TLV: `f0 06` followed by the
    /// 6-byte numeric value. Infallible, every field fits by construction.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + FIXED_PROFILE_LEN);
        out.push(HEADER_TLV_TYPE);
        out.push(FIXED_PROFILE_LEN as u8);
        out.push(self.tier);
        out.push(self.type_code);
        out.extend_from_slice(&self.app_id.to_be_bytes());
        out.extend_from_slice(&self.version.to_be_bytes());
        out
    }
}
