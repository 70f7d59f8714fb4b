//! Security Audit Logging
//!
//! Audit events for the remote session runner.
//!
//! ## Security Policy
//!
//! - **NEVER** log passwords or any other credential material
//! - Hosts are logged only after sanitizing; prompts only by type
//! - INFO level for normal events, WARN for refused or failed authentication

use tracing::{info, warn};

/// Security audit event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// SSH connection initiated
    SshConnectionAttempt,
    /// Authentication prompt seen on the terminal
    SshAuthPrompt,
    /// A configured credential was written to the terminal
    SshCredentialSent,
    /// Prompted for a credential that was not configured
    SshCredentialMissing,
    /// SSH session ended
    SshSessionEnd,
}

impl SecurityEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> &'static str {
        match self {
            SecurityEvent::SshConnectionAttempt => "SSH connection initiated",
            SecurityEvent::SshAuthPrompt => "SSH authentication prompt received",
            SecurityEvent::SshCredentialSent => "SSH credential supplied",
            SecurityEvent::SshCredentialMissing => "SSH credential requested but not configured",
            SecurityEvent::SshSessionEnd => "SSH session terminated",
        }
    }

    /// Whether this event should be raised at WARN
    pub fn is_suspicious(&self) -> bool {
        matches!(self, SecurityEvent::SshCredentialMissing)
    }
}

/// Log a security audit event
///
/// Never pass sensitive data as metadata, only hostnames, types and counts.
///
/// # Examples
///
/// ```
/// use opskit::security_audit::{log_security_event, SecurityEvent};
///
/// log_security_event(SecurityEvent::SshConnectionAttempt, Some("host=example.com"));
/// ```
pub fn log_security_event(event: SecurityEvent, metadata: Option<&str>) {
    let event_desc = event.description();

    let log_message = if let Some(meta) = metadata {
        format!("SECURITY AUDIT: {} | {}", event_desc, meta)
    } else {
        format!("SECURITY AUDIT: {}", event_desc)
    };

    if event.is_suspicious() {
        warn!("{}", log_message);
    } else {
        info!("{}", log_message);
    }
}

/// Log SSH connection attempt (destination only, no credentials)
pub fn log_ssh_connection(destination: &str) {
    log_security_event(
        SecurityEvent::SshConnectionAttempt,
        Some(&format!("host={}", sanitize_hostname(destination))),
    );
}

/// Log an authentication prompt (type only, never the input)
pub fn log_auth_prompt(prompt_type: &str) {
    log_security_event(
        SecurityEvent::SshAuthPrompt,
        Some(&format!("type={}", prompt_type)),
    );
}

/// Log that a credential was written, or that one was missing
pub fn log_credential(prompt_type: &str, supplied: bool) {
    let event = if supplied {
        SecurityEvent::SshCredentialSent
    } else {
        SecurityEvent::SshCredentialMissing
    };
    log_security_event(event, Some(&format!("type={}", prompt_type)));
}

/// Log SSH session end
pub fn log_ssh_session_end(duration_secs: u64) {
    log_security_event(
        SecurityEvent::SshSessionEnd,
        Some(&format!("duration={}s", duration_secs)),
    );
}

/// Sanitize hostname to prevent log injection
fn sanitize_hostname(host: &str) -> String {
    host.chars()
        .filter(|c| c.is_alphanumeric() || matches!(*c, '.' | '-' | '@' | ':' | '_'))
        .take(100)
        .collect()
}
