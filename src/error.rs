// src/error.rs
//! Error kinds surfaced by the session and file-intelligence engine.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Every failure the core can report. All of them are recoverable: the
/// session path and the filesystem are left as they were before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FmError {
    #[error("access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("invalid name: {name:?}")]
    InvalidName { name: String },

    #[error("operation failed: {reason}")]
    OperationFailed { reason: String },

    #[error("'{name}' not found")]
    NotFound { name: String },

    #[error("command not recognized")]
    Unrecognized,

    #[error("transcription failed: {reason}")]
    TranscriptionFailed { reason: String },
}

/// Result alias used throughout the core.
pub type Result<T, E = FmError> = std::result::Result<T, E>;

impl FmError {
    /// Map an I/O error raised while touching `path`.
    ///
    /// Permission problems become `AccessDenied`; anything else is reported
    /// as `OperationFailed` with the OS message.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FmError::AccessDenied {
                path: path.to_path_buf(),
            },
            _ => FmError::OperationFailed {
                reason: format!("{}: {}", path.display(), err),
            },
        }
    }

    pub(crate) fn operation(reason: impl Into<String>) -> Self {
        FmError::OperationFailed {
            reason: reason.into(),
        }
    }
}
