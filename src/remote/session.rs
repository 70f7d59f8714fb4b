//! Scripted SSH session over a duplex terminal stream
//!
//! The session is written against any `Read + Write` stream so it can be
//! driven by a real PTY master or by a scripted stream in tests.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use zeroize::Zeroizing;

use super::output::LossyUtf8Decoder;
use super::prompt::PromptWatcher;
use crate::config::{DeployConfig, ENV_PASSWORD};
use crate::error::{Error, Result};
use crate::security_audit;

/// Tunables for a scripted session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Pause between answering the prompt and sending the command
    pub settle_delay: Duration,
    /// Size of each read from the terminal
    pub read_buffer_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
            read_buffer_size: 1024,
        }
    }
}

/// How the login phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Prompt seen and the password was written
    PasswordSent,
    /// Stream closed or failed before any prompt appeared
    StreamEnded,
}

/// What happened during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Whether the password was written to the terminal
    pub password_sent: bool,
    /// Bytes forwarded to the output after the command was sent
    pub bytes_forwarded: u64,
}

/// Command line written once the login phase is over
pub fn command_line(list_path: &str) -> String {
    format!("ls -la {}\nexit\n", list_path)
}

/// Read a chunk, treating any error other than EINTR as end of stream
fn read_chunk<S: Read>(stream: &mut S, buf: &mut [u8]) -> Option<usize> {
    loop {
        match stream.read(buf) {
            Ok(0) => {
                debug!("Terminal stream closed");
                return None;
            }
            Ok(n) => return Some(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Terminal read error ({}), treating as end of session: {}", e.kind(), e);
                return None;
            }
        }
    }
}

/// Read until a password prompt appears, answering it at most once
///
/// Returns as soon as the password has been written, without waiting for
/// the login to be confirmed. Fails with [`Error::PasswordRequired`] when
/// a prompt appears and no password is configured.
pub fn wait_for_password_prompt<S: Read + Write>(
    stream: &mut S,
    password: &str,
    options: &SessionOptions,
) -> Result<PromptOutcome> {
    let mut watcher = PromptWatcher::new();
    let mut buf = vec![0u8; options.read_buffer_size.max(1)];
    let mut discarded = 0usize;

    while let Some(n) = read_chunk(stream, &mut buf) {
        if !watcher.feed(&buf[..n]) {
            discarded += n;
            continue;
        }

        security_audit::log_auth_prompt("password");
        if password.is_empty() {
            security_audit::log_credential("password", false);
            return Err(Error::PasswordRequired {
                key: ENV_PASSWORD.to_string(),
            });
        }

        let mut line = Zeroizing::new(Vec::with_capacity(password.len() + 1));
        line.extend_from_slice(password.as_bytes());
        line.push(b'\n');
        write_all(stream, &line, "password")?;
        security_audit::log_credential("password", true);
        debug!("Password sent after {} bytes of login output", discarded);
        return Ok(PromptOutcome::PasswordSent);
    }

    debug!("No password prompt seen in {} bytes of login output", discarded);
    Ok(PromptOutcome::StreamEnded)
}

/// Write the listing command followed by `exit`
pub fn send_command<S: Write>(stream: &mut S, list_path: &str) -> Result<()> {
    info!("Sending command: ls -la {}", list_path);
    write_all(stream, command_line(list_path).as_bytes(), "command")
}

/// Copy everything the terminal produces to `out` until the stream ends
pub fn forward_output<S: Read, W: Write>(
    stream: &mut S,
    out: &mut W,
    options: &SessionOptions,
) -> Result<u64> {
    let mut decoder = LossyUtf8Decoder::new();
    let mut buf = vec![0u8; options.read_buffer_size.max(1)];
    let mut forwarded = 0u64;

    while let Some(n) = read_chunk(stream, &mut buf) {
        forwarded += n as u64;
        let text = decoder.decode(&buf[..n]);
        if !text.is_empty() {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
    }

    let rest = decoder.finish();
    if !rest.is_empty() {
        out.write_all(rest.as_bytes())?;
    }
    out.flush()?;
    Ok(forwarded)
}

/// Drive a full session: login, settle, command, forward output
pub fn run_session<S: Read + Write, W: Write>(
    stream: &mut S,
    config: &DeployConfig,
    options: &SessionOptions,
    out: &mut W,
) -> Result<SessionSummary> {
    let outcome = wait_for_password_prompt(stream, config.password.as_str(), options)?;

    if !options.settle_delay.is_zero() {
        std::thread::sleep(options.settle_delay);
    }
    send_command(stream, &config.list_path)?;

    let bytes_forwarded = forward_output(stream, out, options)?;

    Ok(SessionSummary {
        password_sent: outcome == PromptOutcome::PasswordSent,
        bytes_forwarded,
    })
}

fn write_all<S: Write>(stream: &mut S, data: &[u8], what: &'static str) -> Result<()> {
    stream
        .write_all(data)
        .and_then(|()| stream.flush())
        .map_err(|source| Error::PtyWriteFailed { what, source })
}
