//! Digest output formatting
//!
//! Formatting is a pure function over the raw digest bytes; it has no
//! failure mode for valid input and is independent of how the bytes were
//! produced.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::digest::DigestFormat;

/// Render raw digest bytes in the requested output format.
///
/// Hex output is fixed-width (two characters per byte, zero-padded);
/// Base64 uses the RFC 4648 standard alphabet with padding.
pub fn format_digest(raw: &[u8], format: DigestFormat) -> String {
    match format {
        DigestFormat::HexLower => hex::encode(raw),
        DigestFormat::HexUpper => hex::encode_upper(raw),
        DigestFormat::Base64 => BASE64_STANDARD.encode(raw),
    }
}
