//! Lossy UTF-8 decoding of chunked terminal output

use std::char::REPLACEMENT_CHARACTER;

/// Incremental UTF-8 decoder for terminal output
///
/// Invalid byte sequences become U+FFFD. A multi-byte character cut in half
/// by a read boundary is held back until the next chunk completes it.
#[derive(Debug, Default)]
pub struct LossyUtf8Decoder {
    pending: Vec<u8>,
}

impl LossyUtf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `chunk` (plus any held-back bytes) as possible
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;
        let mut keep_from = self.pending.len();

        while start < self.pending.len() {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        None => {
                            keep_from = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..keep_from);
        out
    }

    /// Flush held-back bytes at end of stream
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}
