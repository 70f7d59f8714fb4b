//! Text decoding with a Latin-1 fallback

/// Encoding that produced a decoded string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Bytes were valid UTF-8
    Utf8,
    /// Bytes were mapped one-to-one onto U+0000..=U+00FF
    Latin1,
}

/// Decode file bytes as text; never fails
///
/// Valid UTF-8 is returned unchanged. Anything else is decoded as Latin-1,
/// where every byte value maps to the code point of the same number.
pub fn decode_text(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(e) => (latin1(e.as_bytes()), TextEncoding::Latin1),
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
