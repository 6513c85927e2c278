use std::time::Duration;

/// Errors from remote listing, streaming and conversion
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The location is not an `ftp://host/path` URI
    #[error("Malformed remote location: '{0}'")]
    InvalidLocation(String),

    /// An external tool needed for the operation is not installed
    #[error("Required tool '{0}' not found")]
    ToolMissing(String),

    /// The operation exceeded its time budget
    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout {
        /// What was being done
        operation: String,
        /// Budget that was exceeded
        after: Duration,
    },

    /// An external command exited unsuccessfully
    #[error("{command} failed (exit {code:?}): {stderr}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },

    /// Conversion ran but produced no output file
    #[error("Conversion produced no output: {0}")]
    MissingOutput(String),

    /// A path cannot be passed safely to an `lftp` script
    #[error("Refusing unsafe remote path: '{0}'")]
    UnsafePath(String),

    /// The file's format has no streaming counter
    #[error("No MS2 markers defined for '{0}'")]
    UnsupportedFormat(String),

    /// I/O error while talking to a subprocess or the local filesystem
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
