use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a serial renaming run before any file is touched.
///
/// Failures of individual renames are not represented here; they are
/// collected as [`crate::rename::RenameFailure`] values and the run continues.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("target folder {} does not exist", .0.display())]
    TargetFolderMissing(PathBuf),

    #[error("target {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to list {}: {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to build serial pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised by the timestamp editor. Every variant aborts the whole
/// invocation.
#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("target is not a regular file: {}", .0.display())]
    InvalidTarget(PathBuf),

    #[error("invalid time '{input}', expected format '{format}': {reason}")]
    InvalidTimeFormat {
        input: String,
        format: String,
        reason: String,
    },

    #[error("failed to write timestamps for {}: {source}", path.display())]
    TimestampWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
