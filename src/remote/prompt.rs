//! Password prompt detection on a raw terminal byte stream

/// Byte sequence that marks an SSH password prompt.
///
/// Matches both `Password:` and `password:` as printed by OpenSSH and PAM.
pub const PASSWORD_PROMPT_MARKER: &[u8] = b"assword:";

/// Scans successive terminal chunks for [`PASSWORD_PROMPT_MARKER`]
///
/// The last few bytes of each chunk are carried into the next scan so a
/// prompt split across two reads is still recognised.
#[derive(Debug, Default)]
pub struct PromptWatcher {
    tail: Vec<u8>,
}

impl PromptWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk; returns true once the marker has been seen
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if contains(chunk, PASSWORD_PROMPT_MARKER) {
            self.tail.clear();
            return true;
        }

        let mut window = std::mem::take(&mut self.tail);
        window.extend_from_slice(chunk);
        let found = contains(&window, PASSWORD_PROMPT_MARKER);

        let keep = PASSWORD_PROMPT_MARKER.len() - 1;
        let start = window.len().saturating_sub(keep);
        self.tail = window.split_off(start);
        if found {
            self.tail.clear();
        }
        found
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
