//! Text to bytes and back. Every hex conversion in the crate goes through here.

use serde::Serializer;
use std::num::ParseIntError;

/// Decodes a run of two-digit byte pairs. Case-insensitive; odd lengths and
/// non-hex characters are rejected.
pub fn decode(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(text)
}

/// Parses an offset written as bare hex (no `0x`).
pub fn parse_offset(text: &str) -> Result<u64, ParseIntError> {
    u64::from_str_radix(text, 16)
}

/// Uppercase concatenated pairs, as printed in reports.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// `serialize_with` helper writing bytes the way [`encode`] prints them.
pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&encode(bytes.as_ref()))
}
