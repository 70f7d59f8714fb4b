//! Error types and Result aliases for opskit

use std::path::PathBuf;

/// Result type alias for opskit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for opskit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Configuration errors ===
    /// Required environment variable is unset or blank
    #[error("Missing required env var: {key}")]
    MissingEnvVar { key: String },

    /// The remote asked for a password but none was configured
    #[error("Password prompt received but {key} is empty")]
    PasswordRequired { key: String },

    // === PTY-related errors ===
    /// Failed to create PTY
    #[error("Failed to create PTY for command '{command}': {reason}")]
    PtyCreationFailed { command: String, reason: String },

    /// Failed to spawn command in PTY
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Failed to clone PTY reader
    #[error("Failed to clone PTY reader: {reason}")]
    PtyReaderCloneFailed { reason: String },

    /// Failed to take PTY writer
    #[error("Failed to take PTY writer: {reason}")]
    PtyWriterTakeFailed { reason: String },

    /// Failed to write to the PTY master
    #[error("Failed to write {what} to PTY: {source}")]
    PtyWriteFailed {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Failed to wait for the child process
    #[error("Failed to wait for child process: {reason}")]
    ChildWaitFailed { reason: String },

    // === Serializer errors ===
    /// Root directory does not exist or cannot be resolved
    #[error("Root directory '{}' cannot be resolved: {source}", path.display())]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No project root can be derived from the executable location
    #[error("Cannot derive a project root from '{}'", exe.display())]
    NoDefaultRoot { exe: PathBuf },

    /// Failed to write the dump file
    #[error("Failed to write dump to '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error comes from missing or incomplete configuration.
    ///
    /// Configuration errors are raised before any connection is attempted,
    /// or at the password prompt when no password is available.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::MissingEnvVar { .. } | Error::PasswordRequired { .. }
        )
    }
}
