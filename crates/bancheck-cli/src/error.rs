//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Input document could not be read as JSON or YAML
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// Document path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bancheck library error
    #[error("Bancheck error: {0}")]
    Bancheck(#[from] bancheck::BancheckError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Verification finished with mismatching snapshots
    #[error("{failed} snapshot(s) did not match")]
    SnapshotsFailed {
        /// Number of failed names
        failed: usize,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error for a document
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether the failure is a snapshot mismatch rather than an error
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::SnapshotsFailed { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = CliError::parse("tests.yaml", "unexpected end");
        assert_eq!(err.to_string(), "Failed to parse tests.yaml: unexpected end");
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_snapshots_failed() {
        let err = CliError::SnapshotsFailed { failed: 2 };
        assert!(err.is_mismatch());
        assert_eq!(err.to_string(), "2 snapshot(s) did not match");
        assert!(!CliError::config("x").is_mismatch());
    }

    #[test]
    fn test_library_error_from() {
        let err: CliError = bancheck::BancheckError::invalid_argument("not an object").into();
        assert!(err.to_string().contains("Bancheck"));
        assert!(err.to_string().contains("not an object"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
