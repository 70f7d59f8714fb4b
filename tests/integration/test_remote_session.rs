//! Integration tests for the scripted SSH session
//!
//! These drive the session against a mock terminal, so no ssh client or
//! remote host is needed.

#[path = "../test_utils/mock_pty.rs"]
mod mock_pty;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::time::Duration;

use mock_pty::{BrokenTerminal, MockTerminal};
use opskit::remote::{run_session, SessionOptions};
use opskit::{DeployConfig, Error};

fn options() -> SessionOptions {
    SessionOptions {
        settle_delay: Duration::ZERO,
        ..SessionOptions::default()
    }
}

fn config(pairs: &[(&str, &str)]) -> opskit::Result<DeployConfig> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    DeployConfig::from_lookup(move |key| env.get(key).cloned())
}

#[test]
fn test_blank_host_rejected_before_connecting() {
    for host in ["", "   ", "\t"] {
        let err = config(&[("DEPLOY_HOST", host), ("DEPLOY_PASSWORD", "pw")]).unwrap_err();
        assert!(err.is_config_error());
    }
}

#[test]
fn test_full_session_with_password() {
    let config = config(&[
        ("DEPLOY_HOST", "deploy.example.com"),
        ("DEPLOY_PASSWORD", "hunter2"),
    ])
    .unwrap();
    let mut term = MockTerminal::new()
        .queue_text("Warning: Permanently added 'deploy.example.com' to known hosts.\r\n")
        .queue_text("root@deploy.example.com's password: ")
        .queue_text("\r\nLast login: Mon Oct 19 09:12:44 2026\r\n")
        .queue_text("total 12\r\ndrwxr-xr-x  3 root root 4096 Oct 19 09:00 .\r\n")
        .queue_text("logout\r\n");
    let mut out = Vec::new();

    let summary = run_session(&mut term, &config, &options(), &mut out).unwrap();

    assert!(summary.password_sent);
    assert_eq!(term.input_text(), "hunter2\nls -la /opt\nexit\n");

    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("total 12"));
    assert!(shown.contains("logout"));
    assert!(!shown.contains("Permanently added"));
    assert!(!shown.contains("hunter2"));
}

#[test]
fn test_login_output_after_prompt_is_not_read_before_password() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_PASSWORD", "pw")]).unwrap();
    let mut term = MockTerminal::new().queue_text("Password:").queue_text("Password:");
    let mut out = Vec::new();

    run_session(&mut term, &config, &options(), &mut out).unwrap();

    let input = term.input_text();
    assert_eq!(input.matches("pw\n").count(), 1);
    assert!(input.starts_with("pw\n"));
    assert_eq!(String::from_utf8(out).unwrap(), "Password:");
}

#[test]
fn test_prompt_without_password_fails_with_config_error() {
    let config = config(&[("DEPLOY_HOST", "h")]).unwrap();
    let mut term = MockTerminal::new().queue_text("h's password: ");
    let mut out = Vec::new();

    let err = run_session(&mut term, &config, &options(), &mut out).unwrap_err();

    assert!(err.is_config_error());
    assert!(matches!(err, Error::PasswordRequired { .. }));
    assert!(term.input_received.is_empty());
    assert!(out.is_empty());
}

#[test]
fn test_key_based_login_reads_until_stream_ends() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_LIST_PATH", "/var/www")]).unwrap();
    let mut term = MockTerminal::new().queue_text("Welcome to Ubuntu\r\n$ ");
    let mut out = Vec::new();

    let summary = run_session(&mut term, &config, &options(), &mut out).unwrap();

    assert!(!summary.password_sent);
    assert_eq!(term.input_text(), "ls -la /var/www\nexit\n");
}

#[test]
fn test_read_errors_end_session_quietly() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_PASSWORD", "pw")]).unwrap();
    let mut term = MockTerminal::new()
        .queue_text("Password:")
        .queue_text("partial output\r\n")
        .queue_error(ErrorKind::Other)
        .queue_text("after the error");
    let mut out = Vec::new();

    let summary = run_session(&mut term, &config, &options(), &mut out).unwrap();

    assert_eq!(summary.bytes_forwarded, "partial output\r\n".len() as u64);
    assert_eq!(String::from_utf8(out).unwrap(), "partial output\r\n");
}

#[test]
fn test_invalid_utf8_output_is_replaced() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_PASSWORD", "pw")]).unwrap();
    let mut term = MockTerminal::new()
        .queue_text("Password:")
        .queue_bytes(b"caf\xc3")
        .queue_bytes(b"\xa9 \xff ok\r\n");
    let mut out = Vec::new();

    run_session(&mut term, &config, &options(), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "café \u{FFFD} ok\r\n");
}

#[test]
fn test_write_failure_is_reported() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_PASSWORD", "pw")]).unwrap();
    let mut term = BrokenTerminal::default();
    let mut out = Vec::new();

    let err = run_session(&mut term, &config, &options(), &mut out).unwrap_err();

    assert!(matches!(err, Error::PtyWriteFailed { what: "password", .. }));
    assert!(!err.is_config_error());
}

#[test]
fn test_small_read_buffer_still_finds_prompt() {
    let config = config(&[("DEPLOY_HOST", "h"), ("DEPLOY_PASSWORD", "pw")]).unwrap();
    let mut term = MockTerminal::new().queue_text("root@h's password: ");
    let options = SessionOptions {
        settle_delay: Duration::ZERO,
        read_buffer_size: 3,
    };
    let mut out = Vec::new();

    let summary = run_session(&mut term, &config, &options, &mut out).unwrap();

    assert!(summary.password_sent);
    assert!(term.input_text().starts_with("pw\n"));
}
