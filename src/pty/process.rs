//! PTY Process Spawning
//!
//! Spawns a child attached to a pseudoterminal using the portable-pty crate
//! and hands back the master side as a single duplex stream.

use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize};
use std::time::{Duration, Instant};

use super::streams::PtyStream;
use crate::error::{Error, Result};

/// Lifecycle state of a spawned PTY child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PtyState {
    /// Process is running
    #[default]
    Running,
    /// Process has been reaped
    Terminated,
}

/// Exit information collected when the child is reaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    /// Exit code reported by the child
    pub code: u32,
    /// Whether the child reported success
    pub success: bool,
    /// Wall time between spawn and reap
    pub elapsed: Duration,
}

/// Process spawning configuration
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Terminal size
    pub size: PtySize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            size: PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            },
        }
    }
}

/// A running child attached to a PTY
///
/// The master side is kept alive for as long as the session exists; the
/// slave side is dropped right after spawning so reads observe end-of-stream
/// once the child exits.
pub struct PtySession {
    /// Command that was executed
    pub command: String,
    /// Arguments passed to the command
    pub args: Vec<String>,
    /// OS process identifier, when the platform reports one
    pub pid: Option<u32>,
    /// Duplex stream over the PTY master
    pub stream: PtyStream,
    state: PtyState,
    started: Instant,
    child: Box<dyn Child + Send + Sync>,
    _master: Box<dyn MasterPty + Send>,
}

impl PtySession {
    /// Current lifecycle state
    pub fn state(&self) -> PtyState {
        self.state
    }

    /// Terminate the child and reap it
    pub fn kill(&mut self) -> Result<()> {
        self.child.kill()?;
        self.child.wait().map_err(|e| Error::ChildWaitFailed {
            reason: e.to_string(),
        })?;
        self.state = PtyState::Terminated;
        Ok(())
    }

    /// Block until the child exits
    pub fn wait(&mut self) -> Result<ChildExit> {
        let status = self.child.wait().map_err(|e| Error::ChildWaitFailed {
            reason: e.to_string(),
        })?;
        self.state = PtyState::Terminated;

        let exit = ChildExit {
            code: status.exit_code(),
            success: status.success(),
            elapsed: self.started.elapsed(),
        };
        debug!(
            "PTY child '{}' (pid {:?}) exited with code {} after {:?}",
            self.command, self.pid, exit.code, exit.elapsed
        );
        Ok(exit)
    }
}

impl std::fmt::Debug for PtySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtySession")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("pid", &self.pid)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Spawn a new PTY process with the given command
pub fn spawn_pty_process(
    command: &str,
    args: &[String],
    config: &SpawnConfig,
) -> Result<PtySession> {
    let pty_system = native_pty_system();

    let pair = pty_system
        .openpty(config.size)
        .map_err(|e| Error::PtyCreationFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    let mut cmd_builder = CommandBuilder::new(command);
    cmd_builder.args(args);

    let child = pair
        .slave
        .spawn_command(cmd_builder)
        .map_err(|e| Error::CommandSpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;
    drop(pair.slave);

    let pid = child.process_id();
    debug!("Spawned '{}' in PTY with pid {:?}", command, pid);

    let reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| Error::PtyReaderCloneFailed {
            reason: e.to_string(),
        })?;
    let writer = pair
        .master
        .take_writer()
        .map_err(|e| Error::PtyWriterTakeFailed {
            reason: e.to_string(),
        })?;

    Ok(PtySession {
        command: command.to_string(),
        args: args.to_vec(),
        pid,
        stream: PtyStream::new(reader, writer),
        state: PtyState::Running,
        started: Instant::now(),
        child,
        _master: pair.master,
    })
}
