//! Remote Session Runner
//!
//! Logs into a host with the system `ssh` client through a pseudoterminal,
//! answers the password prompt if one appears, runs `ls -la <path>` and
//! streams the remote output to the caller.

pub mod output;
pub mod prompt;
pub mod session;

pub use output::LossyUtf8Decoder;
pub use prompt::{PromptWatcher, PASSWORD_PROMPT_MARKER};
pub use session::{
    command_line, forward_output, run_session, send_command, wait_for_password_prompt,
    PromptOutcome, SessionOptions, SessionSummary,
};

use std::io::Write;

use crate::config::DeployConfig;
use crate::error::Result;
use crate::pty::{spawn_pty_process, SpawnConfig};
use crate::security_audit;

/// SSH client binary, resolved through `PATH`
pub const SSH_PROGRAM: &str = "ssh";

/// Arguments passed to the SSH client
pub fn ssh_args(config: &DeployConfig) -> Vec<String> {
    vec![
        "-o".to_string(),
        "StrictHostKeyChecking=no".to_string(),
        config.destination(),
    ]
}

/// Run the scripted session against the configured host
///
/// Remote output is written to `out` as it arrives. The child's exit code
/// is logged but does not affect the result.
pub fn run<W: Write>(
    config: &DeployConfig,
    options: &SessionOptions,
    out: &mut W,
) -> Result<SessionSummary> {
    security_audit::log_ssh_connection(&config.destination());

    let mut session = spawn_pty_process(SSH_PROGRAM, &ssh_args(config), &SpawnConfig::default())?;

    let summary = match run_session(&mut session.stream, config, options, out) {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(kill_err) = session.kill() {
                debug!("Failed to stop ssh after error: {}", kill_err);
            }
            return Err(e);
        }
    };

    let exit = session.wait()?;
    if !exit.success {
        info!("ssh exited with code {}", exit.code);
    }
    security_audit::log_ssh_session_end(exit.elapsed.as_secs());

    Ok(summary)
}
