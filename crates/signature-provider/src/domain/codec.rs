//! # Envelope Codec
//!
//! Hex encoding of text and bytes, and the transport-string form of an
//! envelope: `hex(JSON(envelope))`.
//!
//! All functions are pure and never panic. Malformed input is reported as a
//! [`CodecError`]; the `*_value` helpers return `None` for non-string input.
//!
//! Hex output is always lowercase, two digits per byte. Hex input must have an
//! even number of digits; odd-length or non-hex input is an error rather than
//! a partial decode.

use crate::domain::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Encode UTF-8 text as lowercase hex.
pub fn hex_encode(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decode hex back into UTF-8 text.
pub fn hex_decode(hex: &str) -> Result<String, CodecError> {
    let bytes = hex_to_array(hex)?;
    Ok(String::from_utf8(bytes)?)
}

/// [`hex_encode`] over an untyped value: `None` unless `value` is a string.
pub fn hex_encode_value(value: &Value) -> Option<String> {
    value.as_str().map(hex_encode)
}

/// [`hex_decode`] over an untyped value: `None` unless `value` is a string
/// holding valid hex of UTF-8 text.
pub fn hex_decode_value(value: &Value) -> Option<String> {
    value.as_str().and_then(|hex| hex_decode(hex).ok())
}

/// Encode bytes as lowercase hex, each byte as exactly two digits.
pub fn array_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex into bytes. Each two-digit chunk becomes one byte.
pub fn hex_to_array(hex: &str) -> Result<Vec<u8>, CodecError> {
    if hex.len() % 2 != 0 {
        return Err(CodecError::OddLength(hex.len()));
    }
    Ok(hex::decode(hex)?)
}

/// Serialize an envelope to its transport string.
pub fn pack_envelope<E: Serialize>(envelope: &E) -> Result<String, CodecError> {
    let json = serde_json::to_string(envelope)?;
    Ok(hex_encode(&json))
}

/// Parse a transport string back into an envelope (or any JSON shape,
/// e.g. [`Value`] for untyped classification).
pub fn unpack_envelope<E: DeserializeOwned>(packed: &str) -> Result<E, CodecError> {
    let json = hex_decode(packed)?;
    Ok(serde_json::from_str(&json)?)
}
