//! opskit - small operations utilities
//!
//! Two independent tools share this crate:
//!
//! - **Remote Session Runner** ([`remote`], binary `remote-run`): logs into
//!   a host with the system `ssh` client through a pseudoterminal, answers
//!   the password prompt, runs `ls -la <path>` and streams the output.
//! - **Project Serializer** ([`dump`], binary `project-dump`): writes every
//!   text file of a project tree into a single JSON document.
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration for the session runner
//! - [`pty`] - Spawning a child attached to a PTY, duplex master stream
//! - [`remote`] - Prompt detection, scripted session, output forwarding
//! - [`dump`] - Ignore rules, pruned traversal, text decoding, JSON output
//! - [`security_audit`] - Credential-safe audit events
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> opskit::Result<()> {
//! let report = opskit::dump::serialize(Path::new("."), Path::new("project_dump.json"))?;
//! println!("{} files", report.files_written);
//! # Ok(())
//! # }
//! ```
//!
//! Both tools are single-threaded and use blocking I/O only.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod dump;
pub mod error;
pub mod pty;
pub mod remote;
pub mod security_audit;

// Re-exports for core functionality
pub use config::DeployConfig;
pub use error::{Error, Result};

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the stderr log subscriber used by the binaries
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` when `debug`
/// is true or `OPSKIT_DEBUG` is `1`/`true`, and `info` otherwise.
pub fn init_logging(debug: bool) {
    let debug_env = std::env::var(config::ENV_DEBUG)
        .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"));
    let log_level = if debug || debug_env { "debug" } else { "info" };

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Short remediation hint shown under a fatal error
pub fn error_hint(error: &Error) -> Option<&'static str> {
    match error {
        Error::MissingEnvVar { .. } => Some("Set DEPLOY_HOST to the host to connect to"),
        Error::PasswordRequired { .. } => {
            Some("Set DEPLOY_PASSWORD, or configure key-based login for this host")
        }
        Error::CommandSpawnFailed { .. } => {
            Some("Check that an ssh client is installed and on PATH")
        }
        Error::RootNotFound { .. } => Some("Pass an existing project directory as ROOT"),
        Error::OutputWriteFailed { .. } => Some("Check that the output directory is writable"),
        _ => None,
    }
}
