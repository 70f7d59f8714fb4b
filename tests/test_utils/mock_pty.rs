//! Mock PTY terminal for driving scripted sessions in tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// One scripted read result
#[derive(Debug)]
pub enum ReadStep {
    /// Return these bytes
    Data(Vec<u8>),
    /// Fail with this error kind
    Fail(io::ErrorKind),
}

/// Terminal that replays queued output and records everything written
#[derive(Debug, Default)]
pub struct MockTerminal {
    steps: VecDeque<ReadStep>,
    /// Everything written to the terminal, in order
    pub input_received: Vec<u8>,
    /// Number of read calls served so far
    pub reads: usize,
    /// Number of read calls made after the first write
    pub reads_after_input: usize,
}

impl MockTerminal {
    /// Create an empty mock terminal
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue text output
    pub fn queue_text(mut self, text: &str) -> Self {
        self.steps.push_back(ReadStep::Data(text.as_bytes().to_vec()));
        self
    }

    /// Queue raw output
    pub fn queue_bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.push_back(ReadStep::Data(bytes.to_vec()));
        self
    }

    /// Queue a read failure
    pub fn queue_error(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(ReadStep::Fail(kind));
        self
    }

    /// Input as text
    pub fn input_text(&self) -> String {
        String::from_utf8_lossy(&self.input_received).into_owned()
    }
}

impl Read for MockTerminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if !self.input_received.is_empty() {
            self.reads_after_input += 1;
        }
        match self.steps.pop_front() {
            None => Ok(0),
            Some(ReadStep::Fail(kind)) => Err(io::Error::new(kind, "mock read failure")),
            Some(ReadStep::Data(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.steps.push_front(ReadStep::Data(data[n..].to_vec()));
                }
                Ok(n)
            }
        }
    }
}

impl Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.input_received.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal that shows a password prompt once and rejects every write
#[derive(Debug, Default)]
pub struct BrokenTerminal {
    prompted: bool,
}

impl Read for BrokenTerminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.prompted {
            return Ok(0);
        }
        self.prompted = true;
        let prompt = b"Password:";
        let n = prompt.len().min(buf.len());
        buf[..n].copy_from_slice(&prompt[..n]);
        Ok(n)
    }
}

impl Write for BrokenTerminal {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pty closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_terminal_replays_in_order() {
        let mut term = MockTerminal::new().queue_text("one").queue_text("two");
        let mut buf = [0u8; 8];
        assert_eq!(term.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"one");
        assert_eq!(term.read(&mut buf).unwrap(), 3);
        assert_eq!(term.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_mock_terminal_splits_large_chunks() {
        let mut term = MockTerminal::new().queue_text("abcdef");
        let mut buf = [0u8; 4];
        assert_eq!(term.read(&mut buf).unwrap(), 4);
        assert_eq!(term.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn test_mock_terminal_records_input() {
        let mut term = MockTerminal::new();
        term.write_all(b"hello\n").unwrap();
        assert_eq!(term.input_text(), "hello\n");
    }
}
