//! Percent codec for URI path octets.
//!
//! Octets outside the unreserved set `[A-Za-z0-9-_.~]` are written as `%`
//! followed by two uppercase hex digits. Decoding is lenient: a `%` that is
//! not followed by two hex digits is copied through verbatim rather than
//! rejected, so misbehaving input degrades to garbage-in/garbage-out instead
//! of a routing failure.

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Returns `true` for octets that pass through encoding unchanged.
#[inline]
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode `src` into `dest`, returning the number of octets that
/// were escaped.
///
/// Every escaped octet grows to three bytes, so the worst-case output is
/// three times the input length; `dest` is grown accordingly before writing.
pub fn encode_to(dest: &mut String, src: &[u8]) -> usize {
    dest.reserve(src.len());
    let mut escaped = 0;
    for &byte in src {
        if is_unreserved(byte) {
            dest.push(byte as char);
        } else {
            dest.push('%');
            dest.push(HEX_UPPER[(byte >> 4) as usize] as char);
            dest.push(HEX_UPPER[(byte & 0x0F) as usize] as char);
            escaped += 1;
        }
    }
    escaped
}

/// Percent-encode `src` into a fresh string.
///
/// Note that encoding is not idempotent on already-escaped text: the `%` of
/// an existing triplet is itself escaped again.
pub fn encode(src: &[u8]) -> String {
    let mut dest = String::with_capacity(src.len());
    encode_to(&mut dest, src);
    dest
}

/// Decode `%XX` triplets in `src` into `dest`.
///
/// Output length is always less than or equal to the input length. Malformed
/// triplets (a trailing `%`, or `%` followed by non-hex digits) are copied
/// through unchanged.
pub fn decode_to(dest: &mut Vec<u8>, src: &[u8]) {
    dest.reserve(src.len());
    let mut pos = 0;
    while pos < src.len() {
        let byte = src[pos];
        if byte == b'%' {
            if let (Some(hi), Some(lo)) = (
                src.get(pos + 1).copied().and_then(hex_value),
                src.get(pos + 2).copied().and_then(hex_value),
            ) {
                dest.push((hi << 4) | lo);
                pos += 3;
                continue;
            }
        }
        dest.push(byte);
        pos += 1;
    }
}

/// Decode `%XX` triplets in `src` into a fresh byte buffer.
pub fn decode(src: &[u8]) -> Vec<u8> {
    let mut dest = Vec::with_capacity(src.len());
    decode_to(&mut dest, src);
    dest
}

/// Decode a percent-escaped string into UTF-8 text.
///
/// Escapes that decode to invalid UTF-8 are replaced with U+FFFD; path
/// variables and query parameters are surfaced through this function.
pub fn decode_str(src: &str) -> String {
    String::from_utf8_lossy(&decode(src.as_bytes())).into_owned()
}
