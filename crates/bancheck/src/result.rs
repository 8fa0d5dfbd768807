//! Result and error types for Bancheck.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Bancheck operations
pub type BancheckResult<T> = Result<T, BancheckError>;

/// Errors that can occur in Bancheck
///
/// A snapshot that does not match is not an error; it is reported in the
/// `fails` map of a [`crate::VerifyReport`].
#[derive(Debug, Error)]
pub enum BancheckError {
    /// Tests or options did not satisfy the mapping contract
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Snapshot file exists but could not be parsed or rendered
    #[error("Snapshot file {} is malformed: {message}", path.display())]
    SnapshotFormat {
        /// Snapshot file path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BancheckError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a snapshot format error
    #[must_use]
    pub fn snapshot_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SnapshotFormat {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from reading or writing the snapshot file
    #[must_use]
    pub const fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::SnapshotFormat { .. })
    }
}
