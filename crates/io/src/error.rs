use std::fmt;
use std::io;
use std::path::Path;

use vmca_recon::FailureKind;

/// Failure of a registry or inventory source, already classified for the
/// response boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub kind: FailureKind,
    pub message: String,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::NotFound, message: message.into() }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::AuthFailed, message: message.into() }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Other, message: message.into() }
    }

    /// Classify an IO error on `path`: missing → NotFound, permission → AuthFailed.
    pub fn from_io(err: &io::Error, path: &Path) -> Self {
        let message = format!("{}: {err}", path.display());
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(message),
            io::ErrorKind::PermissionDenied => Self::auth_failed(message),
            _ => Self::other(message),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {}
