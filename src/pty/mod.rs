//! Pseudoterminal (PTY) Management
//!
//! Spawning a child attached to a pseudoterminal and talking to it through
//! the master side.

pub mod process;
pub mod streams;

// Re-exports for convenience
pub use process::{spawn_pty_process, ChildExit, PtySession, PtyState, SpawnConfig};
pub use streams::PtyStream;
