//! Dash-delimited hex wire format helpers.

use crate::error::{LicenseError, LicenseResult};

/// Segment separator.
pub(crate) const SEPARATOR: char = '-';

/// Segment count of a raw license.
pub(crate) const RAW_SEGMENTS: usize = 3;

/// Segment count of a signed license.
pub(crate) const SIGNED_SEGMENTS: usize = 4;

/// Splits license text into its non-empty segments, requiring `expected` of them.
pub(crate) fn split(text: &str, expected: usize) -> LicenseResult<Vec<&str>> {
    let parts: Vec<&str> = text
        .trim()
        .split(SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != expected {
        return Err(LicenseError::InvalidLicenseString {
            expected,
            actual: parts.len(),
        });
    }
    Ok(parts)
}

pub(crate) fn encode_text(value: &str) -> String {
    hex::encode(value.as_bytes())
}

pub(crate) fn decode_text(segment: &str) -> LicenseResult<String> {
    let bytes = decode_bytes(segment)?;
    String::from_utf8(bytes).map_err(|e| LicenseError::InvalidEncoding(e.to_string()))
}

pub(crate) fn decode_bytes(segment: &str) -> LicenseResult<Vec<u8>> {
    hex::decode(segment).map_err(|e| LicenseError::InvalidHex(format!("{segment:?}: {e}")))
}

/// Minimal lowercase hex, no zero padding.
pub(crate) fn encode_secs(secs: u64) -> String {
    format!("{secs:x}")
}

pub(crate) fn decode_secs(segment: &str) -> LicenseResult<u64> {
    if !segment.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LicenseError::InvalidHex(format!("{segment:?}: not a hex number")));
    }
    u64::from_str_radix(segment, 16)
        .map_err(|e| LicenseError::InvalidTimestamp(format!("{segment:?}: {e}")))
}
