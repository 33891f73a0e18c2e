//! Typed error definitions for the filesystem layer.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::retry::AttemptError;

#[derive(Debug, Error)]
pub enum SafePathError {
    #[error("Source path not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Destination is a directory: {}", .0.display())]
    DestinationIsDirectory(PathBuf),

    #[error("Destination '{}' lies inside source '{}'", .dst.display(), .src.display())]
    DestinationInsideSource { src: PathBuf, dst: PathBuf },

    #[error("Invalid file pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// An I/O call failed; `hint` is a short platform-aware suggestion (may be empty).
    #[error("{op} '{}'{hint}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        hint: &'static str,
        #[source]
        source: io::Error,
    },
}

impl SafePathError {
    /// The io::ErrorKind behind this error, if it wraps one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SafePathError::Io { source, .. } => Some(source.kind()),
            SafePathError::SourceNotFound(_) => Some(io::ErrorKind::NotFound),
            SafePathError::DestinationExists(_) => Some(io::ErrorKind::AlreadyExists),
            SafePathError::DestinationIsDirectory(_) => Some(io::ErrorKind::IsADirectory),
            SafePathError::DestinationInsideSource { .. } => Some(io::ErrorKind::InvalidInput),
            SafePathError::InvalidPattern { .. } => None,
        }
    }
}

/// Filesystem failures are retryable unless a call site tags them otherwise.
impl From<SafePathError> for AttemptError {
    fn from(err: SafePathError) -> Self {
        AttemptError::Retryable(err.into())
    }
}
