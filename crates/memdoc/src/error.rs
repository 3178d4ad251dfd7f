//! Error types for memdoc.
//!
//! This module defines all error types used throughout the memdoc crate,
//! separating fatal I/O failures from domain errors that the tool-dispatch
//! boundary reshapes into structured failure results.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for memdoc operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Document Errors ===
    /// Failed to create the directory containing the document.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the document file.
    #[error("failed to read document at {path}: {source}")]
    DocumentRead {
        /// Path to the document file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the document file.
    #[error("failed to write document at {path}: {source}")]
    DocumentWrite {
        /// Path to the document file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The sentinel-bounded record section is missing from the document.
    #[error("document at {path} has no memory section")]
    SectionMissing {
        /// Path to the document file.
        path: PathBuf,
    },

    // === Domain Errors ===
    /// No record with the referenced id exists in the document.
    #[error("memory {id} does not exist")]
    MemoryNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A record was found by id but its text changed underneath us.
    #[error("memory {id} changed on disk since it was scanned")]
    StaleMemory {
        /// The id of the drifted record.
        id: String,
    },

    /// Memory content was empty after trimming.
    #[error("memory content is empty")]
    EmptyMemory,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for memdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given memory id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::MemoryNotFound { id: id.into() }
    }

    /// Create a stale-record error for the given memory id.
    #[must_use]
    pub fn stale(id: impl Into<String>) -> Self {
        Self::StaleMemory { id: id.into() }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the referenced memory never existed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemoryNotFound { .. })
    }

    /// Check if this error means the memory drifted under an external edit.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleMemory { .. })
    }

    /// Check if this is a domain error the dispatch boundary reshapes into a
    /// structured failure result (as opposed to a fatal I/O failure).
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::MemoryNotFound { .. } | Self::StaleMemory { .. } | Self::EmptyMemory
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("1234");
        assert_eq!(err.to_string(), "memory 1234 does not exist");

        let err = Error::EmptyMemory;
        assert_eq!(err.to_string(), "memory content is empty");

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::not_found("1").is_not_found());
        assert!(!Error::stale("1").is_not_found());
    }

    #[test]
    fn test_error_is_stale() {
        assert!(Error::stale("1").is_stale());
        assert!(!Error::not_found("1").is_stale());
    }

    #[test]
    fn test_error_is_domain() {
        assert!(Error::not_found("1").is_domain());
        assert!(Error::stale("1").is_domain());
        assert!(Error::EmptyMemory.is_domain());
        assert!(!Error::internal("x").is_domain());
        assert!(!Error::SectionMissing {
            path: PathBuf::from("/tmp/doc.md")
        }
        .is_domain());
    }

    #[test]
    fn test_section_missing_display() {
        let err = Error::SectionMissing {
            path: PathBuf::from("/home/user/notes.md"),
        };
        assert!(err.to_string().contains("/home/user/notes.md"));
        assert!(err.to_string().contains("no memory section"));
    }

    #[test]
    fn test_stale_memory_display() {
        let err = Error::stale("42");
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("changed on disk"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "preview_chars must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("preview_chars"));
    }
}
