//! Error types for regar
//!
//! Single crate-wide error enum in the style of a serving stack: load
//! and parse failures are distinguished so callers can report *why* a
//! model artifact was rejected, and inference failures carry enough
//! context to be surfaced to the client verbatim.

use thiserror::Error;

/// Error type for all regar operations
#[derive(Debug, Error)]
pub enum RegarError {
    /// I/O failure reading a model artifact
    #[error("I/O error: {message}")]
    IoError {
        /// Underlying error description, including the path
        message: String,
    },

    /// Model artifact is structurally invalid (magic, header, payload)
    #[error("Invalid model artifact: {reason}")]
    FormatError {
        /// What made the artifact unreadable
        reason: String,
    },

    /// Artifact declares a format version this build cannot read
    #[error("Unsupported format version: {major}.{minor}")]
    UnsupportedVersion {
        /// Declared major version
        major: u8,
        /// Declared minor version
        minor: u8,
    },

    /// Artifact declares a model type this build cannot run
    #[error("Unsupported model type: {0:#06x}")]
    UnsupportedType(u16),

    /// Input vector length does not match the model's feature count
    #[error("Invalid input dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Feature count the model was trained with
        expected: usize,
        /// Length of the offending input vector
        actual: usize,
    },

    /// Startup configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What made the configuration unusable
        reason: String,
    },

    /// Listener bind or serve failure
    #[error("Server error: {reason}")]
    ServerError {
        /// Underlying error description
        reason: String,
    },
}

/// Result type alias for regar operations
pub type Result<T> = std::result::Result<T, RegarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = RegarError::IoError {
            message: "file not found: model.apr".to_string(),
        };
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("model.apr"));
    }

    #[test]
    fn test_format_error_display() {
        let err = RegarError::FormatError {
            reason: "invalid magic bytes".to_string(),
        };
        assert!(err.to_string().contains("Invalid model artifact"));
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_unsupported_version_display() {
        let err = RegarError::UnsupportedVersion { major: 9, minor: 1 };
        assert!(err.to_string().contains("9.1"));
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = RegarError::UnsupportedType(0x00FF);
        assert!(err.to_string().contains("Unsupported model type"));
        assert!(err.to_string().contains("0x00ff"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = RegarError::DimensionMismatch {
            expected: 10,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 10"));
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = RegarError::InvalidConfiguration {
            reason: "bad address".to_string(),
        };
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_server_error_display() {
        let err = RegarError::ServerError {
            reason: "address in use".to_string(),
        };
        assert!(err.to_string().contains("Server error"));
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn test_error_debug_names_variant() {
        let err = RegarError::DimensionMismatch {
            expected: 10,
            actual: 2,
        };
        let debug = format!("{err:?}");
        assert!(debug.contains("DimensionMismatch"));
    }
}
