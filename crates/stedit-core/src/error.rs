//! Error types for the metadata editor.
//!
//! Every public operation reduces these to human-readable status text, so
//! the `Display` strings double as the messages a front-end shows verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metadata editing operations.
#[derive(Debug, Error)]
pub enum EditorError {
    // Input errors
    #[error("No source file provided")]
    NoSourceFile,

    #[error("Validation error: {message}")]
    Validation { message: String },

    // External tool errors
    #[error("Failed to launch {tool:?}: {message}")]
    ToolLaunch {
        tool: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Error code {code}")]
    ReaderFailed { code: i32 },

    #[error("Save failure: {stderr}")]
    WriterFailed { stderr: String },

    // Metadata errors
    #[error("Invalid metadata structure")]
    MetadataDecode,

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

// Conversion implementations for common error types

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        EditorError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl EditorError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        EditorError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Render this error as the status text shown at the save boundary.
    ///
    /// The named workflow failures keep their own message; infrastructure
    /// failures (IO, spawn, serialization) collapse into the generic
    /// `Critical error:` form so a front-end never sees a raw internal
    /// error chain.
    pub fn to_status_text(&self) -> String {
        match self {
            EditorError::NoSourceFile
            | EditorError::Validation { .. }
            | EditorError::ReaderFailed { .. }
            | EditorError::WriterFailed { .. }
            | EditorError::MetadataDecode => self.to_string(),

            other => format!("Critical error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditorError::ReaderFailed { code: 1 };
        assert_eq!(err.to_string(), "Error code 1");

        let err = EditorError::Validation {
            message: "expected value at line 1 column 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Validation error: expected value at line 1 column 2"
        );

        let err = EditorError::WriterFailed {
            stderr: "permission denied".into(),
        };
        assert_eq!(err.to_string(), "Save failure: permission denied");
    }

    #[test]
    fn test_status_text_keeps_workflow_messages() {
        assert_eq!(
            EditorError::NoSourceFile.to_status_text(),
            "No source file provided"
        );
        assert_eq!(
            EditorError::MetadataDecode.to_status_text(),
            "Invalid metadata structure"
        );
    }

    #[test]
    fn test_status_text_wraps_infrastructure_errors() {
        let err = EditorError::Other("staging directory vanished".into());
        assert_eq!(
            err.to_status_text(),
            "Critical error: staging directory vanished"
        );

        let io = EditorError::from(std::io::Error::other("disk full"));
        assert!(io.to_status_text().starts_with("Critical error: "));
    }
}
